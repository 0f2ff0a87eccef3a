use tracing::{debug, info, instrument};

use crate::flightcodes::tools::clean::{self, FillPolicy, RouteCase};
use crate::flightcodes::tools::error::Result;
use crate::flightcodes::tools::io::delimited;
use crate::flightcodes::tools::model::{AIRLINE_CODE, FLIGHT_CODES, FROM, ROUTE, TO, Table};

/// The flight sample shipped with the tool, used when no input file is given.
pub const EMBEDDED_DATASET: &str = "\
Airline Code;DelayTimes;FlightCodes;To_From
Air Canada (!);[21, 40];20015.0;WAterLoo_NEWYork
<Air France> (12);[];;Montreal_TORONTO
(Porter Airways. );[60, 22, 87];20035.0;CALgary_Ottawa
12. Air France;[78, 66];;Ottawa_VANcouvER
\"\"\".\\.Lufthansa.\\.\"\"\";[12, 33];20055.0;london_MONTreal
";

/// Separator between origin and destination in the combined route column.
pub const ROUTE_SEPARATOR: char = '_';

/// Knobs for the transformation steps. The default reproduces the
/// canonical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub fill: FillPolicy,
    pub route_case: RouteCase,
}

/// Parses delimited text and runs every transformation over it.
#[instrument(level = "info", skip_all, fields(bytes = source.len()))]
pub fn run(source: &str, options: &PipelineOptions) -> Result<Table> {
    let table = delimited::read_table_from_str(source)?;
    info!(
        rows = table.height(),
        columns = table.width(),
        "parsed flight table"
    );
    transform(table, options)
}

/// Cleans airline codes, fills flight codes, splits routes, and drops the
/// combined route column, in that order.
#[instrument(level = "info", skip_all, fields(rows = table.height(), ?options))]
pub fn transform(mut table: Table, options: &PipelineOptions) -> Result<Table> {
    clean::clean_text_column(&mut table, AIRLINE_CODE)?;
    debug!("airline codes cleaned");

    clean::fill_missing_codes(&mut table, FLIGHT_CODES, options.fill)?;
    debug!("flight codes filled");

    clean::split_route(
        &mut table,
        ROUTE,
        ROUTE_SEPARATOR,
        (FROM, TO),
        options.route_case,
    )?;
    table.drop_column(ROUTE)?;
    info!(
        rows = table.height(),
        columns = table.width(),
        "flight table transformed"
    );
    Ok(table)
}
