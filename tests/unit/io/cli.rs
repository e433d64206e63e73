//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use oddcell::io::cli::{BatchSummary, Cli, FileProcessor, is_supported_image, parse_region};
    use oddcell::io::configuration::{DEFAULT_DEBUG_LIMIT, DEFAULT_SENSITIVITY};
    use oddcell::io::report::ReportMode;
    use oddcell::io::synthetic::GridImage;
    use oddcell::spatial::Rect;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tracing::level_filters::LevelFilter;

    const RED: [u8; 3] = [200, 50, 50];

    fn run(args: &[&str]) -> (oddcell::Result<BatchSummary>, String) {
        let cli = Cli::parse_from(args);
        let mut processor = FileProcessor::new(cli).expect("Failed to create processor");
        let mut out = Vec::new();
        let result = processor.process_into(&mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    fn save_grid(dir: &Path, name: &str, grid: &GridImage) -> PathBuf {
        let path = dir.join(name);
        grid.render().save(&path).expect("Failed to save image");
        path
    }

    // Tests CLI parsing with only the required target
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["oddcell", "shot.png"]);

        assert_eq!(cli.target, PathBuf::from("shot.png"));
        assert_eq!(cli.sensitivity, DEFAULT_SENSITIVITY);
        assert_eq!(cli.debug_limit, DEFAULT_DEBUG_LIMIT);
        assert_eq!((cli.scale_x, cli.scale_y), (1.0, 1.0));
        assert!(cli.region.is_none());
        assert!(cli.should_show_progress());
        assert_eq!(cli.report_mode(), ReportMode::Summary);
        assert_eq!(cli.log_level(), LevelFilter::WARN);
    }

    // Tests CLI parsing with every option
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "oddcell",
            "shots",
            "-s",
            "2.5",
            "--debug",
            "--debug-limit",
            "5",
            "--json",
            "--quiet",
            "--region",
            "10,20,300,200",
            "--scale-x",
            "2",
            "--scale-y",
            "1.5",
            "-vv",
        ]);

        assert_eq!(cli.sensitivity, 2.5);
        assert!(cli.json);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.region, Some(Rect::new(10, 20, 300, 200)));
        assert_eq!((cli.scale_x, cli.scale_y), (2.0, 1.5));
        assert_eq!(cli.report_mode(), ReportMode::Debug { limit: 5 });
        assert_eq!(cli.log_level(), LevelFilter::DEBUG);
    }

    // Tests invalid option values are rejected by the parser
    #[test]
    fn test_cli_rejects_invalid_values() {
        assert!(Cli::try_parse_from(["oddcell", "a.png", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["oddcell", "a.png", "-s", "-1"]).is_err());
        assert!(Cli::try_parse_from(["oddcell", "a.png", "--scale-x", "4"]).is_err());
        assert!(Cli::try_parse_from(["oddcell", "a.png", "--region", "1,2,3"]).is_err());
    }

    // Tests region parsing
    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("1, 2, 30, 40"), Ok(Rect::new(1, 2, 30, 40)));
        assert!(parse_region("1,2,3,4,5").is_err());
        assert!(parse_region("a,b,c,d").is_err());
    }

    // Tests extension matching is case-insensitive
    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.PNG")));
        assert!(is_supported_image(Path::new("dir/b.jpeg")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    // Tests a single image prints the plain summary
    #[test]
    fn test_process_single_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let grid = GridImage::uniform(3, 3, RED).with_cell(2, 2, [50, 200, 50]);
        let path = save_grid(temp_dir.path(), "shot.png", &grid);

        let (result, out) = run(&["oddcell", path.to_str().unwrap_or_default(), "-q"]);
        let summary = result.expect("processing should succeed");

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.detected, 1);
        assert_eq!(out, "Grid: 3x3\n* row 2, column 2  (RGB(50, 200, 50))\n");
    }

    // Tests a detection failure is reported and the batch continues
    #[test]
    fn test_process_directory_continues_after_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        save_grid(temp_dir.path(), "a.png", &GridImage::uniform(2, 2, RED));
        RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]))
            .save(temp_dir.path().join("b.png"))
            .expect("Failed to save image");
        fs::write(temp_dir.path().join("notes.txt"), "ignored").expect("Failed to write");

        let (result, out) = run(&["oddcell", temp_dir.path().to_str().unwrap_or_default(), "-q"]);
        let summary = result.expect("processing should succeed");

        assert_eq!(
            summary,
            BatchSummary {
                processed: 2,
                detected: 1,
                failed: 1
            }
        );
        assert!(out.contains("a.png ==\nGrid: 2x2\nall cells share the same color"));
        assert!(out.contains("b.png ==\nno valid grid detected"));
        assert!(out.find("a.png") < out.find("b.png"));
    }

    // Tests JSON lines output for a batch
    #[test]
    fn test_process_json_batch() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        save_grid(temp_dir.path(), "one.png", &GridImage::uniform(2, 3, RED));
        save_grid(temp_dir.path(), "two.png", &GridImage::uniform(3, 2, RED));

        let dir = temp_dir.path().to_str().unwrap_or_default();
        let (result, out) = run(&["oddcell", dir, "--json", "-q"]);
        assert!(result.is_ok());

        let values: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is JSON"))
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.first().map(|v| v["grid"].clone()), Some(serde_json::json!([2, 3])));
        assert_eq!(values.last().map(|v| v["grid"].clone()), Some(serde_json::json!([3, 2])));
    }

    // Tests the capture region is cropped before analysis
    #[test]
    fn test_process_with_region() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let grid = GridImage::uniform(2, 2, RED).with_cell(1, 2, [50, 200, 50]);
        let mut screen = RgbImage::from_pixel(400, 300, Rgb([255, 255, 255]));
        image::imageops::replace(&mut screen, &grid.render(), 100, 50);
        let path = temp_dir.path().join("screen.png");
        screen.save(&path).expect("Failed to save image");

        let region = format!("50,25,{},{}", grid.width() / 2, grid.height() / 2);
        let (result, out) = run(&[
            "oddcell",
            path.to_str().unwrap_or_default(),
            "-q",
            "--region",
            region.as_str(),
            "--scale-x",
            "2",
            "--scale-y",
            "2",
        ]);
        assert!(result.is_ok());
        assert_eq!(out, "Grid: 2x2\n* row 1, column 2  (RGB(50, 200, 50))\n");
    }

    // Tests unsupported or missing targets are errors
    #[test]
    fn test_invalid_targets() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let text = temp_dir.path().join("notes.txt");
        fs::write(&text, "not an image").expect("Failed to write");

        let (result, _) = run(&["oddcell", text.to_str().unwrap_or_default(), "-q"]);
        assert!(result.is_err());

        let missing = temp_dir.path().join("missing");
        let (result, _) = run(&["oddcell", missing.to_str().unwrap_or_default(), "-q"]);
        assert!(result.is_err());
    }

    // Tests an empty directory processes nothing
    #[test]
    fn test_process_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (result, out) = run(&["oddcell", temp_dir.path().to_str().unwrap_or_default(), "-q"]);
        assert_eq!(result.ok(), Some(BatchSummary::default()));
        assert!(out.is_empty());
    }

    // Tests a configuration file is applied
    #[test]
    fn test_config_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = temp_dir.path().join("strict.json");
        fs::write(&config, r#"{ "classifier": { "isolation_distance": 1000.0 } }"#)
            .expect("Failed to write");
        let grid = GridImage::uniform(3, 3, RED).with_cell(2, 2, [50, 200, 50]);
        let path = save_grid(temp_dir.path(), "shot.png", &grid);

        let (result, out) = run(&[
            "oddcell",
            path.to_str().unwrap_or_default(),
            "-q",
            "-c",
            config.to_str().unwrap_or_default(),
        ]);
        assert!(result.is_ok());
        assert!(out.contains("all cells share the same color"));

        let cli = Cli::parse_from(["oddcell", "x.png", "-c", "/nonexistent/config.json"]);
        assert!(FileProcessor::new(cli).is_err());
    }
}
