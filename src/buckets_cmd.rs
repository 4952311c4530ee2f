//! Buckets command: print the temporal partition of a time scale.

use anyhow::Result;

use crate::cli::BucketsArgs;
use crate::convert;

/// Print each bucket label with the calendar months it covers.
pub fn run(args: BucketsArgs) -> Result<()> {
    let scale = convert::parse_time_scale(&args.time_scale)?;
    for bucket in scale.partition().buckets() {
        let months: Vec<String> = bucket.months().iter().map(u8::to_string).collect();
        println!("{}: {}", bucket.label(), months.join(","));
    }
    Ok(())
}
