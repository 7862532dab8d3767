use std::sync::Arc;

use sqlx::PgPool;

use crate::classifier::{CompletionClient, OpenAiClient};
use crate::config::AppConfig;
use crate::line::{LineClient, MessagingClient};
use crate::meals::{MealStore, PgMealStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub meals: Arc<dyn MealStore>,
    pub messaging: Arc<dyn MessagingClient>,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn init(config: Arc<AppConfig>, db: PgPool) -> Self {
        let meals = Arc::new(PgMealStore::new(db)) as Arc<dyn MealStore>;
        let messaging = Arc::new(LineClient::new(&config.line)) as Arc<dyn MessagingClient>;
        let completion = Arc::new(OpenAiClient::new(&config.openai)) as Arc<dyn CompletionClient>;
        Self::from_parts(config, meals, messaging, completion)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        meals: Arc<dyn MealStore>,
        messaging: Arc<dyn MessagingClient>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            meals,
            messaging,
            completion,
        }
    }
}
