//! Shared building blocks for the to-do list service: logging setup and
//! small wire types used across crates.

pub mod types;

pub mod utils {
    pub mod logging;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status_field() {
        let body = serde_json::to_value(types::Health::ok()).unwrap_or_default();
        assert_eq!(body["status"], "ok");
    }
}
