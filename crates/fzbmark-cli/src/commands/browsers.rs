use super::Context;
use crate::Outcome;
use anyhow::Result;
use std::io::{self, Write};

/// Print one `browser<TAB>profile<TAB>store` line per detected profile
pub fn execute(ctx: &Context) -> Result<Outcome> {
    let profiles = ctx.profiles()?;

    let mut out = io::stdout().lock();
    for profile in &profiles {
        writeln!(
            out,
            "{}\t{}\t{}",
            profile.browser,
            profile.name,
            profile.store.display()
        )?;
    }

    Ok(Outcome::Success)
}
