use std::{
    fs::{create_dir_all, read_dir, read_to_string, write},
    path::Path,
};

use tempfile::TempDir;
use twc_core::{
    pickup::{URL_GARBAGE, URL_RECYCLING},
    pipeline::{run, Summary},
    Config, Error,
};

static HEADER: &str = "_id,Calendar,WeekStarting,GreenBin,Garbage,Recycling,YardWaste,ChristmasTree\n";

/// Create the schedules and output directories of a run inside a temporary directory.
fn setup() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    create_dir_all(dir.path().join("schedules")).unwrap();
    create_dir_all(dir.path().join("output/csv")).unwrap();
    create_dir_all(dir.path().join("output/ics")).unwrap();
    let config = Config {
        schedules: format!(
            "{}/schedules/pickup-schedule-*.csv",
            dir.path().display()
        ),
        output_dir: dir.path().join("output"),
        ..Config::default()
    };
    (dir, config)
}

fn write_schedule(dir: &TempDir, name: &str, rows: &str) {
    write(
        dir.path().join("schedules").join(name),
        format!("{HEADER}{rows}"),
    )
    .unwrap();
}

fn count_files(dir: &Path) -> usize {
    read_dir(dir).unwrap().count()
}

#[test]
fn test_single_row() {
    let (dir, config) = setup();
    write_schedule(&dir, "pickup-schedule-A.csv", "1,North,01-06-2024,1,1,0,0,0\n");
    let summary = run(&config).unwrap();
    assert_eq!(summary.calendars, 1);
    assert_eq!(summary.pickups, 1);
    assert_eq!(summary.csv_files, vec![config.csv_dir().join("North.csv")]);
    assert_eq!(summary.ics_files, vec![config.ics_dir().join("North.ics")]);

    let csv = read_to_string(config.csv_dir().join("North.csv")).unwrap();
    assert_eq!(
        csv,
        format!(
            "Subject,Start Date,All Day Event,Description\r\n\
             🗑 Garbage Day,06-01-24,TRUE,Garbage/Green Bin - See {URL_GARBAGE}\r\n"
        )
    );

    let ics = read_to_string(config.ics_dir().join("North.ics")).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(ics.contains("X-WR-CALNAME:North Waste Pickup\r\n"));
    assert!(ics.contains(&format!("URL;VALUE=URI:{URL_GARBAGE}\r\n")));
    assert!(ics.contains("DTSTART;VALUE=DATE:20240601\r\n"));
    assert!(ics.contains("UID:20240601North\r\n"));
    assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
}

/// Files are read in sorted order and rows are kept in input order.
#[test]
fn test_file_order() {
    let (dir, config) = setup();
    write_schedule(
        &dir,
        "pickup-schedule-B.csv",
        "1,Ward1,2024-01-01,1,0,1,0,0\n",
    );
    write_schedule(
        &dir,
        "pickup-schedule-A.csv",
        "1,Ward1,2024-12-30,1,1,0,0,0\n2,Ward1,2024-06-03,1,0,1,1,0\n",
    );
    write_schedule(&dir, "other-schedule.csv", "1,Ward2,2024-01-01,1,1,0,0,0\n");
    let summary = run(&config).unwrap();
    assert_eq!(summary.calendars, 1);
    assert_eq!(summary.pickups, 3);

    let csv = read_to_string(config.csv_dir().join("Ward1.csv")).unwrap();
    let dates: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(1).unwrap())
        .collect();
    assert_eq!(dates, vec!["12-30-24", "06-03-24", "01-01-24"]);
    assert!(csv.contains(&format!("Recycling/Green Bin/Yard Waste - See {URL_RECYCLING}")));
}

#[test]
fn test_no_schedules() {
    let (_dir, config) = setup();
    let summary = run(&config).unwrap();
    assert_eq!(summary, Summary::default());
    assert_eq!(count_files(&config.csv_dir()), 0);
    assert_eq!(count_files(&config.ics_dir()), 0);
}

/// All calendars of a run share the generation stamp.
#[test]
fn test_shared_stamp() {
    let (dir, config) = setup();
    write_schedule(
        &dir,
        "pickup-schedule-2024.csv",
        "1,North,2024-01-02,1,1,0,0,0\n2,South,2024-01-03,1,0,1,0,0\n3,North,2024-01-09,1,0,1,0,1\n",
    );
    run(&config).unwrap();
    let stamps: Vec<String> = ["North.ics", "South.ics"]
        .iter()
        .flat_map(|name| {
            read_to_string(config.ics_dir().join(name))
                .unwrap()
                .lines()
                .filter(|line| line.starts_with("DTSTAMP;VALUE=DATETIME:"))
                .map(String::from)
                .collect::<Vec<String>>()
        })
        .collect();
    assert_eq!(stamps.len(), 3);
    assert!(stamps.iter().all(|stamp| stamp == &stamps[0]));
}

#[test]
fn test_exclude_ics() {
    let (dir, mut config) = setup();
    config.exclude_ics = true;
    write_schedule(&dir, "pickup-schedule-A.csv", "1,North,01-06-2024,1,1,0,0,0\n");
    let summary = run(&config).unwrap();
    assert_eq!(summary.csv_files.len(), 1);
    assert!(summary.ics_files.is_empty());
    assert_eq!(count_files(&config.ics_dir()), 0);
}

#[test]
fn test_malformed_row() {
    let (dir, config) = setup();
    write_schedule(
        &dir,
        "pickup-schedule-A.csv",
        "1,North,01-06-2024,1,1,0,0,0\n2,North,08-06-2024,1,1\n",
    );
    let error = run(&config).unwrap_err();
    assert!(matches!(error, Error::Record { line: 3, .. }));
    assert!(error.to_string().contains("pickup-schedule-A.csv:3"));
    assert_eq!(count_files(&config.csv_dir()), 0);
}

#[test]
fn test_invalid_date() {
    let (dir, config) = setup();
    write_schedule(&dir, "pickup-schedule-A.csv", "1,North,2024/06/01,1,1,0,0,0\n");
    let error = run(&config).unwrap_err();
    assert!(error
        .to_string()
        .ends_with("date \"2024/06/01\" does not match any known format"));
}

/// Output directories are not created.
#[test]
fn test_missing_output_dir() {
    let (dir, mut config) = setup();
    config.output_dir = dir.path().join("missing");
    write_schedule(&dir, "pickup-schedule-A.csv", "1,North,01-06-2024,1,1,0,0,0\n");
    let error = run(&config).unwrap_err();
    assert!(matches!(error, Error::Io { .. }));
}
