use crate::commands::CmdResult;
use crate::error::Result;
use crate::templates;

pub fn run() -> Result<CmdResult> {
    Ok(CmdResult {
        templates: templates::templates().to_vec(),
        ..CmdResult::default()
    })
}
