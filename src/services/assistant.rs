use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{config::Config, error::ApiError, services::metrics};

/// Proxy to an OpenRouter-compatible chat completion endpoint. One user turn
/// in, one assistant reply out; the conversation itself lives client-side.
pub struct AssistantService {
    client: Client,
    config: Arc<Config>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

impl AssistantService {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn chat(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        message: &str,
    ) -> Result<String, ApiError> {
        if message.trim().is_empty() {
            return Err(ApiError::validation("Le message ne peut pas être vide"));
        }

        let Some(api_key) = &self.config.openrouter_api_key else {
            // Degrade gracefully when no key is configured.
            return Ok(
                "L'assistant culinaire n'est pas disponible pour le moment. \
                 Réessayez plus tard."
                    .into(),
            );
        };

        let context = self.build_context(pool, user_id).await?;
        let body = json!({
            "model": self.config.assistant_model,
            "max_tokens": self.config.assistant_max_tokens,
            "messages": [
                { "role": "system", "content": context },
                { "role": "user", "content": message.trim() },
            ],
        });

        metrics::ASSISTANT_REQUESTS.inc();

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.openrouter_base_url
            ))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Assistant: upstream request failed: {}", e);
                ApiError::Unavailable("Assistant indisponible".into())
            })?;

        if !response.status().is_success() {
            tracing::warn!("Assistant: upstream returned {}", response.status());
            return Err(ApiError::Unavailable("Assistant indisponible".into()));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ApiError::Unavailable("Assistant indisponible".into()))?;

        Ok(reply)
    }

    /// System prompt carrying the user's kitchen context: profile, recent
    /// dishes, upcoming plans and pantry highlights.
    async fn build_context(&self, pool: &PgPool, user_id: Uuid) -> Result<String, ApiError> {
        let username: Option<String> =
            sqlx::query_scalar("SELECT username FROM profiles WHERE id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?
                .flatten();

        let dishes: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM dishes WHERE author_id = $1 ORDER BY created_at DESC LIMIT 5",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let plans: Vec<(chrono::NaiveDate, String, String)> = sqlx::query_as(
            "SELECT mp.planned_date, mp.meal_type, COALESCE(d.name, 'Plat supprimé')
             FROM meal_plans mp
             LEFT JOIN dishes d ON d.id = mp.dish_id
             WHERE mp.user_id = $1 AND mp.planned_date >= $2
             ORDER BY mp.planned_date
             LIMIT 5",
        )
        .bind(user_id)
        .bind(Utc::now().date_naive())
        .fetch_all(pool)
        .await?;

        let pantry: Vec<(String, f64, String)> = sqlx::query_as(
            "SELECT i.name, inv.quantity, COALESCE(inv.unit, i.unit)
             FROM inventory inv
             JOIN ingredients i ON i.id = inv.ingredient_id
             WHERE inv.user_id = $1
             ORDER BY inv.updated_at DESC
             LIMIT 10",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut prompt = String::from(
            "Tu es un assistant culinaire francophone pour une application \
             de gestion de repas en famille. Réponds de façon concise et \
             pratique: idées de recettes, équilibrage des menus, utilisation \
             des ingrédients disponibles.\n",
        );
        if let Some(name) = username {
            prompt.push_str(&format!("Utilisateur: {name}.\n"));
        }
        if !dishes.is_empty() {
            let names: Vec<String> = dishes.into_iter().map(|(n,)| n).collect();
            prompt.push_str(&format!("Ses plats récents: {}.\n", names.join(", ")));
        }
        if !plans.is_empty() {
            prompt.push_str("Ses prochains repas planifiés:\n");
            for (date, meal_type, dish) in plans {
                prompt.push_str(&format!("- {date} ({meal_type}): {dish}\n"));
            }
        }
        if !pantry.is_empty() {
            prompt.push_str("Dans son garde-manger:\n");
            for (name, quantity, unit) in pantry {
                prompt.push_str(&format!("- {name}: {quantity} {unit}\n"));
            }
        }

        Ok(prompt)
    }
}
