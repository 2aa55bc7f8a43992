#[cfg(test)]
mod tests {
    use super::super::*;
    use std::fs;
    use tempfile::TempDir;

    fn providers(paths: Vec<PathBuf>) -> Vec<Box<dyn CandidateProvider>> {
        vec![Box::new(StaticCandidates(paths))]
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing-chrome");
        let second = dir.path().join("chrome-a");
        let third = dir.path().join("chrome-b");
        fs::write(&second, b"").unwrap();
        fs::write(&third, b"").unwrap();

        let found = discover_with(
            &providers(vec![missing, second.clone(), third]),
            Path::is_file,
        );
        assert_eq!(found, Executable::Path(second));
    }

    #[test]
    fn test_order_is_respected_across_providers() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"").unwrap();
        fs::write(&b, b"").unwrap();

        let list: Vec<Box<dyn CandidateProvider>> = vec![
            Box::new(StaticCandidates(vec![b.clone()])),
            Box::new(StaticCandidates(vec![a])),
        ];
        assert_eq!(discover_with(&list, Path::is_file), Executable::Path(b));
    }

    #[test]
    fn test_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let found = discover_with(
            &providers(vec![dir.path().join("x"), dir.path().join("y")]),
            Path::is_file,
        );
        assert_eq!(found, Executable::Default);
    }

    #[test]
    fn test_empty_provider_list_is_default() {
        assert_eq!(discover_with(&[], |_| true), Executable::Default);
    }

    #[test]
    fn test_directory_is_not_an_executable() {
        let dir = TempDir::new().unwrap();
        let found = discover_with(&providers(vec![dir.path().to_path_buf()]), Path::is_file);
        assert_eq!(found, Executable::Default);
    }

    #[test]
    fn test_windows_candidates_in_rank_order() {
        let paths = WindowsSystemChrome.candidates();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].to_string_lossy().contains(r"Program Files\Google"));
        assert!(paths[1].to_string_lossy().contains("(x86)"));
    }

    #[test]
    fn test_platform_providers_not_empty() {
        let all: Vec<PathBuf> = platform_providers()
            .iter()
            .flat_map(|p| p.candidates())
            .collect();
        assert!(!all.is_empty());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = TempDir::new().unwrap();
        let chrome = dir.path().join("chrome");
        fs::write(&chrome, b"").unwrap();

        let resolved = resolve_executable(Some(&chrome)).unwrap();
        assert_eq!(resolved, Executable::Path(chrome));
    }

    #[test]
    fn test_resolve_missing_explicit_path_errors() {
        let dir = TempDir::new().unwrap();
        let err = resolve_executable(Some(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, CaptureError::BrowserNotFound(_)));
        assert_eq!(err.exit_code(), 4);
    }
}
