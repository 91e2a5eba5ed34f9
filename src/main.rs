use anyhow::Result;
use std::{env, fs::File};

use scenario_engine_rs::{
    BackendKind, Error, Platform, TransportEngine, read_timeseries, setup_logging,
    solution_records, testing,
};

fn main() -> Result<()> {
    setup_logging()?;

    let reader = get_reader()?;

    let mut mp = Platform::open("transport-demo", BackendKind::Memory)?;
    let mut scen = testing::make_transport(&mut mp, false, false)?;

    let entries: Vec<_> = read_timeseries(reader)
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(e) => {
                handle_row_error(e);
                None
            }
        })
        .collect();
    scen.add_timeseries(&mut mp, entries)?;

    scen.solve(&mut mp, &TransportEngine)?;

    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for record in solution_records(&scen) {
        wtr.serialize(&record)?;
    }
    wtr.flush()?;

    mp.close()?;
    Ok(())
}

fn get_reader() -> Result<impl std::io::Read> {
    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: scenario-engine-rs <timeseries.csv>"))?;
    let file = File::open(&path)?;
    Ok(file)
}

// Just logs skipped rows here, but can be changed to abort or collect them
fn handle_row_error(error: Error) {
    tracing::warn!("skipped timeseries row: {error}")
}
