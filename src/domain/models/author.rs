use std::fmt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub const ASSISTANT_NAME: &str = "GroxAI";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Author::User => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return write!(f, "You");
                }
                return write!(f, "{username}");
            }
            Author::Assistant => return write!(f, "{ASSISTANT_NAME}"),
        }
    }
}
