use speedup::{
    ReportError,
    tasks::{
        config::{ReportConfig, ReportDirs},
        menu,
    },
};
use std::{fs, io::Cursor};
use tempfile::TempDir;

fn scratch_dirs(tmp: &TempDir) -> ReportDirs {
    ReportDirs::new(tmp.path().join("perfs"), tmp.path().join("courbe"))
}

#[test]
fn test_invalid_choice_prints_one_message_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let dirs = scratch_dirs(&tmp);
    let config = ReportConfig::default();

    let mut input = Cursor::new("xyz\n");
    let mut output = Vec::new();
    let written = menu::run(&config, &dirs, &mut input, &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(written.is_empty());
    assert_eq!(output.matches(menu::INVALID_CHOICE).count(), 1);
    assert!(!dirs.output_dir.exists());
}

#[test]
fn test_menu_lists_every_plot_and_token() {
    let config = ReportConfig::default();
    let mut output = Vec::new();
    menu::print_menu(&config, &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    for (idx, plot) in config.plots.iter().enumerate() {
        assert!(output.contains(&format!("{} - {}", idx + 1, plot.title)));
    }
    assert!(output.contains("'montecarlo'"));
    assert!(output.contains("'pi'"));
    assert!(output.contains("'all'"));
}

#[test]
fn test_read_choice_trims_line() {
    let mut input = Cursor::new("  montecarlo \r\n");
    let mut output = Vec::new();

    let choice = menu::read_choice(&mut input, &mut output).unwrap();
    assert_eq!(choice, "montecarlo");
    assert_eq!(String::from_utf8(output).unwrap(), "Votre choix : ");
}

#[test]
fn test_valid_choice_with_missing_log_fails() {
    let tmp = TempDir::new().unwrap();
    let dirs = scratch_dirs(&tmp);
    let mut output = Vec::new();

    let result = menu::dispatch("1", &ReportConfig::default(), &dirs, &mut output);
    match result {
        Err(ReportError::MissingFile(path)) => {
            assert_eq!(path, dirs.input_dir.join("MonteCarlo_Distribue_Strong.csv"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(output.is_empty());
}

#[test]
fn test_valid_choice_with_missing_column_fails() {
    let tmp = TempDir::new().unwrap();
    let dirs = scratch_dirs(&tmp);
    fs::create_dir_all(&dirs.input_dir).unwrap();
    // Pi logs are read with the english schema, so french headers are wrong
    fs::write(
        dirs.input_dir.join("performanceSF_assignment102.csv"),
        "Nb Processeurs,Temps\n1,10.0\n2,5.0\n",
    )
    .unwrap();

    let mut output = Vec::new();
    let result = menu::dispatch("pi", &ReportConfig::default(), &dirs, &mut output);
    assert!(matches!(
        result,
        Err(ReportError::MissingColumn { column, .. }) if column == "numProcessors"
    ));
}

#[test]
fn test_list_shows_resolved_paths() {
    let tmp = TempDir::new().unwrap();
    let dirs = scratch_dirs(&tmp);
    let mut output = Vec::new();

    menu::list(&ReportConfig::default(), &dirs, &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output.lines().count(), 4 + 2 + 1);
    assert!(output.contains(&dirs.output_dir.join("Pi_Weak_Scaling.png").display().to_string()));
}

#[test]
fn test_all_renders_every_chart() {
    let tmp = TempDir::new().unwrap();
    let dirs = scratch_dirs(&tmp);
    fs::create_dir_all(&dirs.input_dir).unwrap();
    fs::write(
        dirs.input_dir.join("MonteCarlo_Distribue_Strong.csv"),
        "Nb Processeurs,Temps\n1,100.0\n2,52.0\n4,27.0\n",
    )
    .unwrap();
    fs::write(
        dirs.input_dir.join("MonteCarlo_Distribue_Weak.csv"),
        "Nb Processeurs,Temps\n1,10.0\n2,10.2\n4,10.5\n",
    )
    .unwrap();
    fs::write(
        dirs.input_dir.join("performanceSF_assignment102.csv"),
        "numProcessors,totalIterations,timeDurationNs\n1,16000000,800000000\n2,16000000,410000000\n",
    )
    .unwrap();
    fs::write(
        dirs.input_dir.join("performanceWF_assignment102.csv"),
        "numProcessors,totalIterations,timeDurationNs\n1,1000000,50000000\n2,2000000,51000000\n",
    )
    .unwrap();

    let mut output = Vec::new();
    let written = menu::dispatch("all", &ReportConfig::default(), &dirs, &mut output).unwrap();

    assert_eq!(written.len(), 4);
    for path in &written {
        assert!(path.exists(), "missing chart: {}", path.display());
    }
    assert!(dirs.output_dir.join("MonteCarlo_Strong_Scaling.png").exists());
}

#[test]
fn test_bundled_plot_table_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("plots.yaml");
    let config = ReportConfig::from_path(&path).unwrap();

    let defaults = ReportConfig::default();
    assert_eq!(config.plots[..4], defaults.plots[..]);
    assert_eq!(config.resolve("socket").unwrap().len(), 1);
    assert!(config.plots[4].average_repeats);
    assert_eq!(config.resolve("all").unwrap().len(), 5);
}
