use serde::Deserialize;

use partshop_core::{Error, Result};

fn succeeded() -> bool { true }

/// `{ success, data, message }` wrapper most endpoints answer with.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default = "succeeded")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(Error::Api(self.message.unwrap_or_else(|| "request was not successful".to_string())));
        }
        self.data.ok_or_else(|| Error::Decode("response envelope has no data".to_string()))
    }
}
