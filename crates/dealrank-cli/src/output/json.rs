use dealrank_core::error::DealError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), DealError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
