//! Jeu de données de démonstration
//!
//! Insère des données de démo réalistes en français :
//! - 3 profils : Marie, Jean-François, Isabelle
//! - 5 catégories et une quinzaine d'ingrédients de base
//! - 8 plats avec leurs lignes d'ingrédients (publics et privés)
//! - Favoris croisés entre profils
//! - Planning de repas sur une fenêtre de jours autour d'aujourd'hui
//! - Membres de famille, inventaire, liste de courses, adresses
//! - 2 annonces marketplace, 1 commande en cours avec messages
//!
//! Usage :
//!   DATABASE_URL=... ./seed-demo [--plan-days 14] [--keep-existing]

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "seed-demo", about = "Insère un jeu de données de démonstration")]
struct Args {
    /// Nombre de jours de planning à générer (centrés sur aujourd'hui)
    #[arg(long, default_value_t = 14)]
    plan_days: i64,

    /// Ne pas supprimer les données de démo existantes avant l'insertion
    #[arg(long)]
    keep_existing: bool,
}

const DEMO_USERNAMES: [&str; 3] = ["marie_demo", "jf_demo", "isabelle_demo"];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed données de démo ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    // 1. Nettoyage des données de démo existantes
    if !args.keep_existing {
        println!("Nettoyage des données de démo existantes...");
        clean_existing(&pool).await?;
    }

    // 2. Profils
    println!("Insertion des profils...");
    let marie_id = Uuid::new_v4();
    let jf_id = Uuid::new_v4();
    let isabelle_id = Uuid::new_v4();

    let profiles = [
        (marie_id, "marie_demo", "Marie", "Tremblay", "Maman de deux enfants, passionnée de cuisine familiale."),
        (jf_id, "jf_demo", "Jean-François", "Leblanc", "Jardinier amateur, je vends mes surplus de légumes."),
        (isabelle_id, "isabelle_demo", "Isabelle", "Roy", "Adepte de recettes rapides en semaine."),
    ];

    for (id, username, first, last, bio) in &profiles {
        sqlx::query(
            "INSERT INTO profiles (id, username, first_name, last_name, bio)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(username)
        .bind(first)
        .bind(last)
        .bind(bio)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert profile {username}"))?;
    }

    // 3. Catégories et ingrédients
    println!("Insertion du catalogue d'ingrédients...");
    let categories = ["Légumes", "Fruits", "Viandes", "Produits laitiers", "Épicerie"];
    let mut category_ids = Vec::with_capacity(categories.len());

    for name in &categories {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO ingredient_categories (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(&pool)
        .await
        .with_context(|| format!("Failed to insert category {name}"))?;
        category_ids.push(id);
    }

    // (name, unit, price_per_unit, category index)
    let ingredients: [(&str, &str, f64, usize); 15] = [
        ("Tomate", "kg", 4.50, 0),
        ("Oignon", "kg", 2.20, 0),
        ("Carotte", "kg", 1.80, 0),
        ("Basilic frais", "botte", 2.50, 0),
        ("Pomme", "kg", 3.90, 1),
        ("Banane", "kg", 1.60, 1),
        ("Poulet entier", "kg", 9.50, 2),
        ("Bœuf haché", "kg", 12.00, 2),
        ("Lait", "L", 1.90, 3),
        ("Fromage cheddar", "kg", 15.00, 3),
        ("Beurre", "kg", 11.00, 3),
        ("Œufs", "douzaine", 4.20, 3),
        ("Riz basmati", "kg", 5.50, 4),
        ("Spaghetti", "kg", 3.20, 4),
        ("Farine tout usage", "kg", 2.10, 4),
    ];

    let mut ingredient_ids = Vec::with_capacity(ingredients.len());
    for (name, unit, price, cat_idx) in &ingredients {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO ingredients (name, unit, price_per_unit, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(name)
        .bind(unit)
        .bind(price)
        .bind(category_ids[*cat_idx])
        .fetch_one(&pool)
        .await
        .with_context(|| format!("Failed to insert ingredient {name}"))?;
        ingredient_ids.push(id);
    }

    // Index des ingrédients par position dans le tableau ci-dessus.
    let ing = |i: usize| ingredient_ids[i];

    // 4. Plats
    println!("Insertion des plats...");

    // (author, name, description, minutes, servings, public, lignes (idx ingrédient, quantité, unité))
    struct DishSeed {
        author: Uuid,
        name: &'static str,
        description: &'static str,
        minutes: i32,
        servings: i32,
        public: bool,
        lines: &'static [(usize, f64, &'static str)],
    }

    let dishes = [
        DishSeed {
            author: marie_id,
            name: "Spaghetti bolognaise",
            description: "Le classique familial, sauce mijotée aux tomates fraîches.",
            minutes: 45,
            servings: 4,
            public: true,
            lines: &[(13, 0.5, "kg"), (7, 0.4, "kg"), (0, 0.6, "kg"), (1, 0.2, "kg")],
        },
        DishSeed {
            author: marie_id,
            name: "Poulet rôti aux légumes",
            description: "Poulet entier rôti au four avec carottes et oignons.",
            minutes: 90,
            servings: 6,
            public: true,
            lines: &[(6, 1.5, "kg"), (2, 0.5, "kg"), (1, 0.3, "kg"), (10, 0.05, "kg")],
        },
        DishSeed {
            author: marie_id,
            name: "Omelette au fromage",
            description: "Rapide et réconfortante pour les soirs pressés.",
            minutes: 15,
            servings: 2,
            public: false,
            lines: &[(11, 0.5, "douzaine"), (9, 0.1, "kg"), (10, 0.02, "kg")],
        },
        DishSeed {
            author: marie_id,
            name: "Crêpes du dimanche",
            description: "Pâte à crêpes maison, parfaite avec des bananes.",
            minutes: 25,
            servings: 4,
            public: true,
            lines: &[(14, 0.25, "kg"), (8, 0.5, "L"), (11, 0.25, "douzaine"), (5, 0.4, "kg")],
        },
        DishSeed {
            author: jf_id,
            name: "Soupe de carottes",
            description: "Soupe onctueuse aux carottes du jardin.",
            minutes: 35,
            servings: 4,
            public: true,
            lines: &[(2, 0.8, "kg"), (1, 0.2, "kg"), (10, 0.03, "kg")],
        },
        DishSeed {
            author: jf_id,
            name: "Salade de tomates au basilic",
            description: "Tomates du jardin, basilic frais, un filet d'huile.",
            minutes: 10,
            servings: 2,
            public: true,
            lines: &[(0, 0.5, "kg"), (3, 0.5, "botte"), (1, 0.1, "kg")],
        },
        DishSeed {
            author: jf_id,
            name: "Riz sauté au poulet",
            description: "Restes de poulet et riz, sauté à la poêle.",
            minutes: 30,
            servings: 4,
            public: false,
            lines: &[(12, 0.4, "kg"), (6, 0.5, "kg"), (1, 0.15, "kg")],
        },
        DishSeed {
            author: isabelle_id,
            name: "Bœuf aux oignons",
            description: "Bœuf haché caramélisé aux oignons, prêt en 20 minutes.",
            minutes: 20,
            servings: 4,
            public: false,
            lines: &[(7, 0.5, "kg"), (1, 0.4, "kg")],
        },
    ];

    let mut dish_ids = Vec::with_capacity(dishes.len());
    for d in &dishes {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO dishes
               (author_id, name, description, cooking_time_minutes, servings, is_public)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(d.author)
        .bind(d.name)
        .bind(d.description)
        .bind(d.minutes)
        .bind(d.servings)
        .bind(d.public)
        .fetch_one(&pool)
        .await
        .with_context(|| format!("Failed to insert dish {}", d.name))?;
        dish_ids.push(id);

        for (ing_idx, quantity, unit) in d.lines {
            sqlx::query(
                "INSERT INTO dish_ingredients (dish_id, ingredient_id, quantity, unit)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(ing(*ing_idx))
            .bind(quantity)
            .bind(unit)
            .execute(&pool)
            .await
            .with_context(|| format!("Failed to insert ingredient line for {}", d.name))?;
        }
    }

    // 5. Favoris
    println!("Insertion des favoris...");
    let favorites = [
        (jf_id, dish_ids[0]),       // Jean-François aime la bolognaise de Marie
        (jf_id, dish_ids[3]),       // ... et ses crêpes
        (isabelle_id, dish_ids[1]), // Isabelle aime le poulet rôti
        (marie_id, dish_ids[4]),    // Marie aime la soupe de Jean-François
    ];
    for (user_id, dish_id) in &favorites {
        sqlx::query(
            "INSERT INTO favorites (user_id, dish_id) VALUES ($1, $2)
             ON CONFLICT (user_id, dish_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(dish_id)
        .execute(&pool)
        .await
        .context("Failed to insert favorite")?;
    }

    // 6. Planning de repas
    println!("Insertion du planning ({} jours)...", args.plan_days);
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();
    let start = today - Duration::days(args.plan_days / 2);
    let meal_types = ["breakfast", "lunch", "snack", "dinner"];

    let mut plan_count = 0u32;
    for user_id in [marie_id, jf_id] {
        for offset in 0..args.plan_days {
            let date = start + Duration::days(offset);
            // 1 à 2 repas planifiés par jour et par profil
            let n = rng.gen_range(1..=2);
            for _ in 0..n {
                let dish_id = match dish_ids.choose(&mut rng) {
                    Some(id) => *id,
                    None => continue,
                };
                let meal_type = meal_types[rng.gen_range(0..meal_types.len())];
                let servings: i32 = rng.gen_range(1..=4);
                sqlx::query(
                    "INSERT INTO meal_plans (user_id, dish_id, planned_date, meal_type, servings)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(user_id)
                .bind(dish_id)
                .bind(date)
                .bind(meal_type)
                .bind(servings)
                .execute(&pool)
                .await
                .with_context(|| format!("Failed to insert meal plan on {date}"))?;
                plan_count += 1;
            }
        }
    }

    // 7. Membres de famille
    println!("Insertion des membres de famille...");
    let family = [
        (marie_id, "Léa", vec!["arachides"], vec![] as Vec<&str>),
        (marie_id, "Noah", vec![], vec!["sans lactose"]),
        (jf_id, "Chloé", vec![], vec![]),
    ];
    for (user_id, name, allergies, restrictions) in &family {
        sqlx::query(
            "INSERT INTO family_members (user_id, name, allergies, dietary_restrictions)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(name)
        .bind(allergies)
        .bind(restrictions)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert family member {name}"))?;
    }

    // 8. Inventaire de Marie
    println!("Insertion de l'inventaire...");
    // (idx ingrédient, quantité, unité, emplacement, seuil bas)
    let inventory: [(usize, f64, &str, &str, Option<f64>); 6] = [
        (8, 2.0, "L", "frigo", Some(1.0)),
        (11, 0.5, "douzaine", "frigo", Some(1.0)), // sous le seuil
        (9, 0.3, "kg", "frigo", None),
        (12, 1.5, "kg", "garde-manger", Some(0.5)),
        (14, 2.0, "kg", "garde-manger", None),
        (0, 1.2, "kg", "frigo", None),
    ];
    for (ing_idx, quantity, unit, location, threshold) in &inventory {
        sqlx::query(
            "INSERT INTO inventory
               (user_id, ingredient_id, quantity, unit, location, low_stock_threshold)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(marie_id)
        .bind(ing(*ing_idx))
        .bind(quantity)
        .bind(unit)
        .bind(location)
        .bind(threshold)
        .execute(&pool)
        .await
        .context("Failed to insert inventory row")?;
    }

    // 9. Liste de courses partagée
    println!("Insertion de la liste de courses...");
    let list_id: Uuid = sqlx::query_scalar(
        "INSERT INTO shopping_lists (user_id, name, is_shared)
         VALUES ($1, 'Courses de la semaine', TRUE)
         RETURNING id",
    )
    .bind(marie_id)
    .fetch_one(&pool)
    .await
    .context("Failed to insert shopping list")?;

    let list_items: [(usize, f64, &str, bool, Uuid); 4] = [
        (7, 0.5, "kg", false, marie_id),
        (13, 1.0, "kg", false, marie_id),
        (5, 1.0, "kg", true, jf_id),
        (10, 0.25, "kg", false, marie_id),
    ];
    for (ing_idx, quantity, unit, checked, added_by) in &list_items {
        sqlx::query(
            "INSERT INTO shopping_list_items
               (shopping_list_id, ingredient_id, quantity, unit, is_checked, added_by)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(list_id)
        .bind(ing(*ing_idx))
        .bind(quantity)
        .bind(unit)
        .bind(checked)
        .bind(added_by)
        .execute(&pool)
        .await
        .context("Failed to insert shopping list item")?;
    }

    // 10. Adresses de livraison
    println!("Insertion des adresses...");
    let locations = [
        (marie_id, "Maison", "123 rue des Érables, Montréal", true),
        (marie_id, "Bureau", "456 boulevard Saint-Laurent, Montréal", false),
        (isabelle_id, "Maison", "789 avenue du Parc, Laval", true),
    ];
    for (user_id, name, address, is_default) in &locations {
        sqlx::query(
            "INSERT INTO user_locations (user_id, name, address, is_default)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(name)
        .bind(address)
        .bind(is_default)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert location {name}"))?;
    }

    // 11. Marketplace : annonces, commande en cours, messages
    println!("Insertion du marketplace...");
    let tomato_listing_id: Uuid = sqlx::query_scalar(
        "INSERT INTO marketplace_items
           (seller_id, ingredient_id, quantity, price_per_unit, description, location)
         VALUES ($1, $2, 5.0, 3.50, 'Tomates du jardin, cueillies ce matin.', 'Montréal')
         RETURNING id",
    )
    .bind(jf_id)
    .bind(ing(0))
    .fetch_one(&pool)
    .await
    .context("Failed to insert tomato listing")?;

    sqlx::query(
        "INSERT INTO marketplace_items
           (seller_id, ingredient_id, quantity, price_per_unit, description, location)
         VALUES ($1, $2, 8.0, 2.90, 'Pommes bio de mon verger.', 'Laval')",
    )
    .bind(isabelle_id)
    .bind(ing(4))
    .execute(&pool)
    .await
    .context("Failed to insert apple listing")?;

    // Marie commande 2 kg de tomates à Jean-François ; elle a déjà confirmé.
    let order_id: Uuid = sqlx::query_scalar(
        "INSERT INTO orders
           (buyer_id, seller_id, marketplace_item_id, quantity, total_price,
            delivery_address, delivery_date, status, buyer_confirmed)
         VALUES ($1, $2, $3, 2.0, 7.00,
                 '123 rue des Érables, Montréal', $4, 'in_progress', TRUE)
         RETURNING id",
    )
    .bind(marie_id)
    .bind(jf_id)
    .bind(tomato_listing_id)
    .bind(today + Duration::days(2))
    .fetch_one(&pool)
    .await
    .context("Failed to insert order")?;

    let now = Utc::now();
    let chat = [
        (marie_id, "Bonjour ! Est-ce que les tomates sont encore bien fermes ?", 26i64),
        (jf_id, "Bonjour Marie ! Oui, cueillies hier soir, parfaites pour une sauce.", 24),
        (marie_id, "Super, je confirme la commande. Jeudi en fin de journée, ça vous va ?", 22),
    ];
    for (sender_id, content, hours_ago) in &chat {
        sqlx::query(
            "INSERT INTO chat_messages (order_id, sender_id, content, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(order_id)
        .bind(sender_id)
        .bind(content)
        .bind(now - Duration::hours(*hours_ago))
        .execute(&pool)
        .await
        .context("Failed to insert chat message")?;
    }

    println!();
    println!("=== Données de démo insérées ! ===");
    println!("  Profils     :");
    for (_, username, first, last, _) in &profiles {
        println!("                {username} ({first} {last})");
    }
    println!("  Ingrédients : {}", ingredients.len());
    println!("  Plats       : {}", dishes.len());
    println!("  Planning    : {plan_count} entrées sur {} jours", args.plan_days);
    println!("  Marketplace : 2 annonces, 1 commande en cours");

    Ok(())
}

/// Supprime les profils de démo ; les cascades emportent tout ce qu'ils
/// possèdent (plats, planning, annonces, commandes, messages).
async fn clean_existing(pool: &PgPool) -> Result<()> {
    sqlx::query("DELETE FROM profiles WHERE username = ANY($1)")
        .bind(&DEMO_USERNAMES[..])
        .execute(pool)
        .await
        .context("Failed to delete demo profiles")?;

    // Le catalogue n'appartient à personne : on retire les ingrédients de démo
    // par nom pour pouvoir relancer le seed proprement.
    sqlx::query(
        "DELETE FROM ingredients WHERE name = ANY($1)",
    )
    .bind(
        &[
            "Tomate", "Oignon", "Carotte", "Basilic frais", "Pomme", "Banane",
            "Poulet entier", "Bœuf haché", "Lait", "Fromage cheddar", "Beurre",
            "Œufs", "Riz basmati", "Spaghetti", "Farine tout usage",
        ][..],
    )
    .execute(pool)
    .await
    .context("Failed to delete demo ingredients")?;

    Ok(())
}
