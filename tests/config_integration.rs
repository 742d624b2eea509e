use std::path::PathBuf;

use texedit::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".texeditrc");
    let content = r"
# comment
--case-sensitive

--icon assets/texedit.png
   
--log-file=texedit.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.case_sensitive);
    assert_eq!(flags.icon, Some(PathBuf::from("assets/texedit.png")));
    assert_eq!(flags.log_file, Some(PathBuf::from("texedit.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".texeditrc");
    let content = "--case-sensitive\n--icon file.png\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "texedit".to_string(),
        "--icon".to_string(),
        "cli.png".to_string(),
        "--force-half-cell".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.case_sensitive, "file flags should remain enabled");
    assert!(effective.force_half_cell, "cli flags should be applied");
    assert_eq!(
        effective.icon,
        Some(PathBuf::from("cli.png")),
        "cli should override the icon"
    );
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_global_and_local_files_merge() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".texeditrc");
    std::fs::write(&global, "--no-icon\n").unwrap();
    std::fs::write(&local, "--case-sensitive\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(
        merged,
        ConfigFlags {
            case_sensitive: true,
            no_icon: true,
            ..ConfigFlags::default()
        }
    );
}
