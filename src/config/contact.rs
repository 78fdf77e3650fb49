//! `[contact]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[contact]` section in affineur.toml - where demo requests are addressed.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    /// Recipient of lead submissions.
    #[serde(default = "defaults::contact::email")]
    #[educe(Default = defaults::contact::email())]
    pub email: String,

    #[serde(default = "defaults::contact::subject")]
    #[educe(Default = defaults::contact::subject())]
    pub subject: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_contact_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.contact.email, "info@airipening.ru");
        assert_eq!(config.contact.subject, "Новая заявка на демо-доступ");
    }
}
