use clap::Parser;

use riscvemu::device::Ram;
use riscvemu::vm::Vm;

/// Run a RV32IM + PRINT/SLEEP program against a flat instruction binary
///
/// The binary is a raw little-endian stream of 32-bit instruction
/// words (no header, no symbol table). A single 16384-word RAM device
/// is registered at `[0x0000, 0x7fff]` before execution begins.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Path to the instruction binary
    binary_path: String,

    /// Number of architectural registers visible to the program, 1-32
    /// (defaults to 32). Accesses beyond this count still work, but
    /// warn on the diagnostic channel.
    register_count: Option<String>,

    /// Trace every instruction and its computed result to stdout
    #[arg(short, long)]
    verbose: bool,
}

/// Exit code for a binary file that could not be opened. A negative
/// exit code is not portable outside this process's own observation of
/// it, but `std::process::exit` accepts it directly.
const EXIT_BINARY_OPEN_FAILURE: i32 = -1;
const EXIT_ARGUMENT_COUNT: i32 = 1;
const EXIT_INVALID_REGISTER_COUNT: i32 = 3;

fn main() {
    // argv shape is checked ahead of `Args::parse()` so that a wrong
    // number of arguments exits with code 1 — clap's own usage-error
    // exit code is 2, not 1.
    let argv: Vec<String> = std::env::args().collect();
    if !(2..=4).contains(&argv.len()) {
        let program = argv.first().map(String::as_str).unwrap_or("riscvemu");
        eprintln!("Usage:");
        eprintln!("\t{program} <riscv binaryfile> [number of registers] [-v]");
        std::process::exit(EXIT_ARGUMENT_COUNT);
    }

    let args = Args::parse();

    let active_count = match args.register_count {
        None => 32,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if (1..=32).contains(&n) => n as usize,
            Ok(_) => {
                eprintln!("Register count must be between 1 and 32");
                std::process::exit(EXIT_INVALID_REGISTER_COUNT);
            }
            Err(_) => {
                eprintln!("Register count must be a int number");
                std::process::exit(EXIT_INVALID_REGISTER_COUNT);
            }
        },
    };

    println!("executing file: {}", args.binary_path);

    let mut vm = match Vm::new(&args.binary_path, active_count, args.verbose) {
        Ok(vm) => vm,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_BINARY_OPEN_FAILURE);
        }
    };

    let mut ram = Ram::new();
    vm.register_device(&mut ram, 0x0000, 0x7fff);

    vm.run();
}
