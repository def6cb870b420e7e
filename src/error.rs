use thiserror::Error;

/// The error type of the hala-burnfade crate.
#[derive(Error, Debug)]
pub struct HalaBurnfadeError {
  msg: String,
  #[source]
  source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// The implementation of the error type of the hala-burnfade crate.
impl HalaBurnfadeError {
  /// Create a new error.
  /// param msg: The message of the error.
  /// param source: The source of the error.
  /// return: The error.
  pub fn new(msg: &str, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self {
      msg: msg.to_string(),
      source,
    }
  }
  pub fn message(&self) -> &str {
    &self.msg
  }
}

impl std::convert::From<rayon::ThreadPoolBuildError> for HalaBurnfadeError {
  fn from(err: rayon::ThreadPoolBuildError) -> Self {
    Self {
      msg: format!("Create the compute thread pool failed: {}", err),
      source: Some(Box::new(err)),
    }
  }
}

impl std::convert::From<serde_json::Error> for HalaBurnfadeError {
  fn from(err: serde_json::Error) -> Self {
    Self {
      msg: format!("Parse the configuration failed: {}", err),
      source: Some(Box::new(err)),
    }
  }
}

impl std::convert::From<std::io::Error> for HalaBurnfadeError {
  fn from(err: std::io::Error) -> Self {
    Self {
      msg: err.to_string(),
      source: Some(Box::new(err)),
    }
  }
}

/// The implementation Display trait for the error type of the hala-burnfade crate.
impl std::fmt::Display for HalaBurnfadeError {
  /// Format the error.
  /// param f: The formatter.
  /// return: The result.
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.msg)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn io_error_keeps_source() {
    let err: HalaBurnfadeError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json").into();
    assert_eq!(err.message(), "missing.json");
    assert!(std::error::Error::source(&err).is_some());
  }

  #[test]
  fn plain_error_has_no_source() {
    let err = HalaBurnfadeError::new("The radius must be positive.", None);
    assert_eq!(err.to_string(), "The radius must be positive.");
    assert!(std::error::Error::source(&err).is_none());
  }
}
