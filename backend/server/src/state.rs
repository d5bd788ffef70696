use std::sync::Arc;

use super::{
    config::Config,
    mailer::{Mailer, SmtpMailer},
};

pub struct State {
    pub config: Config,
    pub mailer: Arc<dyn Mailer>,
}

impl State {
    pub fn new() -> anyhow::Result<Arc<Self>> {
        let config = Config::load()?;
        let mailer = SmtpMailer::new(&config)?;

        Ok(Self::with_mailer(config, Arc::new(mailer)))
    }

    pub fn with_mailer(config: Config, mailer: Arc<dyn Mailer>) -> Arc<Self> {
        Arc::new(Self { config, mailer })
    }
}
