use time_wizard_core::recurrence::{self, WallClock};

pub fn run(expression: &str, timestamp: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ts = recurrence::resolve(expression, &WallClock::now()).ok_or("unresolvable")?;
    if timestamp {
        println!("{ts}");
    } else {
        let formatted = recurrence::format_timestamp(ts).ok_or("unresolvable")?;
        println!("{formatted}");
    }
    Ok(())
}
