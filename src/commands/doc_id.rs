use std::io::{self, Write};

use anyhow::Result;

use crate::cli::DocIdArgs;
use crate::pipeline::generate_doc_id;

pub fn run(args: DocIdArgs) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    for filename in &args.filenames {
        writeln!(output, "{}  {}", generate_doc_id(filename), filename)?;
    }

    output.flush()?;
    Ok(())
}
