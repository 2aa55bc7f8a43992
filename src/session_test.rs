#[cfg(test)]
mod tests {
    use super::super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_with_explicit_executable() {
        let exe = Executable::Path(PathBuf::from("/opt/fake/chrome"));
        let config = browser_config(&exe, &LaunchOptions::default());
        assert!(config.is_ok(), "explicit executable should not need detection");
    }

    #[test]
    fn test_default_launch_options() {
        let options = LaunchOptions::default();
        assert_eq!(options.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_handler_keeps_polling_after_error() {
        // An undecodable message must not stop command replies behind it
        let mut events = futures::stream::iter(vec![
            Ok(()),
            Err("did not match any variant of untagged enum Message"),
            Ok(()),
            Ok(()),
        ]);
        assert_eq!(drive_handler(&mut events).await, 4);
    }

    #[tokio::test]
    async fn test_handler_stops_when_connection_closes() {
        let mut events = futures::stream::iter(Vec::<std::result::Result<(), String>>::new());
        assert_eq!(drive_handler(&mut events).await, 0);
    }
}
