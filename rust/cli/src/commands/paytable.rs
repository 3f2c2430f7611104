use std::io::Write;

use crate::error::CliError;
use crate::formatters::format_pay_table;

pub fn handle_paytable_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", format_pay_table())?;
    Ok(())
}
