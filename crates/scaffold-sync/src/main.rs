//
// main.rs
//

use std::env;

use scaffold_sync::cli::sync::{self, Invocation};

fn print_usage() {
    println!(
        "scaffold-sync {}, keeps generated spec files in sync with their classes.",
        env!("CARGO_PKG_VERSION")
    );
    print!(
        r#"
Usage: scaffold-sync [OPTIONS] <PATH>...

Each PATH is a class file (foo.ts, updating foo.spec.ts) or a directory
searched recursively for class files that have a spec file.

Available options:

--class <NAME>               Class-under-test name (default: first class in the file)
--setup-prefix <PREFIX>      Name prefix of the setup function (default: setup)
--legacy-separators          Only absorb a comma directly after a removed node
--dry-run                    Report edits without writing files
--json                       Print reports as JSON
--version                    Print the version
--help                       Print this help message

"#
    );
}

fn main() -> anyhow::Result<()> {
    let mut argv = env::args();
    argv.next(); // skip executable name

    let rest: Vec<String> = argv.collect();
    if rest.is_empty() {
        print_usage();
        return Ok(());
    }

    let args = match sync::parse_args(&mut rest.into_iter()).map_err(|e| anyhow::anyhow!(e))? {
        Invocation::Help => {
            print_usage();
            return Ok(());
        }
        Invocation::Version => {
            println!("scaffold-sync {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Invocation::Sync(args) => args,
    };

    env_logger::init();

    let failures = sync::run(&args)?;
    if failures > 0 {
        return Err(anyhow::anyhow!(
            "{} file(s) could not be updated",
            failures
        ));
    }
    Ok(())
}
