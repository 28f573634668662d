use seir_spread::io::run_log::write_run_log;
use seir_spread::io::series_csv::{write_series_csv, write_series_csv_file};
use seir_spread::{run, InputMode, SimulationInputs, Solver};

fn density_run() -> (seir_spread::ResolvedParams, seir_spread::TimeSeries) {
    let inputs = SimulationInputs {
        population_size: 500.0,
        initial_infected: 5.0,
        days: 30,
        mode: InputMode::CrowdDensity {
            crowd_density: "High (7-8)".to_string(),
            latent_period: 5.0,
            recovery_period: 10.0,
        },
    };
    run(&inputs, &Solver::default()).expect("valid inputs")
}

#[test]
fn run_log_snapshot_small() {
    let (params, series) = density_run();

    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_run_log(tmp.path().join("logs"), "TEST-SMALL", &params, &series).expect("write run log");
    assert!(path.ends_with("seir_TEST-SMALL.txt"));

    let s = std::fs::read_to_string(path).expect("read run log");
    let (header, body) = s.split_once("\n\n").expect("blank line after header");

    insta::assert_snapshot!(header, @r"
    run_id=TEST-SMALL
    population=500.000000
    initial_infected=5.000000
    beta=0.023333
    sigma=0.200000
    gamma=0.100000
    days=30
    ");

    let rows: Vec<&str> = body.lines().collect();
    assert_eq!(rows[0], "t,susceptible,exposed,infected,recovered");
    assert_eq!(rows[1], "0.000000,495.000000,0.000000,5.000000,0.000000");
    assert_eq!(rows.len(), 1 + 30);
    assert!(rows[30].starts_with("30.000000,"));
}

#[test]
fn series_csv_has_one_row_per_day() {
    let (_params, series) = density_run();

    let mut buf = Vec::new();
    write_series_csv(&mut buf, &series).expect("write csv");

    let mut rdr = csv::Reader::from_reader(buf.as_slice());
    let headers = rdr.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["day", "susceptible", "exposed", "infected", "recovered"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.expect("record")).collect();
    assert_eq!(records.len(), 30);
    assert_eq!(&records[0][1], "495.0");
    assert_eq!(&records[0][3], "5.0");
}

#[test]
fn series_csv_file_round_trips_through_reader() {
    let (_params, series) = density_run();

    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("series.csv");
    write_series_csv_file(&path, &series).expect("write csv file");

    let mut rdr = csv::Reader::from_path(&path).expect("open csv");
    let last = rdr.records().last().expect("rows").expect("record");
    assert_eq!(&last[0], "30.0");

    let missing_dir = tmp.path().join("no/such/dir/series.csv");
    let err = write_series_csv_file(&missing_dir, &series).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to create series CSV"));
}
