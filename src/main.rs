#[macro_use]
extern crate log;

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, Arg};

use std::fs;

use vm16::{Cpu, Memory, Ram, Screen};

/// Size of the whole address space.
const MEMORY_SIZE: usize = 0x10000;

const SCREEN_START: u16 = 0x3000;
const SCREEN_END: u16 = 0x30ff;

/// Accept `0x`-prefixed hex or decimal.
fn parse_number(s: &str) -> Result<u64> {
  let n = if s.starts_with("0x") || s.starts_with("0X") {
    u64::from_str_radix(&s[2..], 16)
  } else {
    s.parse()
  };
  n.with_context(|| format!("invalid number '{}'", s))
}

fn main() -> Result<()> {
  env_logger::init().map_err(|e| anyhow!("failed to start logger: {}", e))?;

  let matches = App::new("vm16")
    .about("Runs a flat 64 KiB memory image on the 16-bit VM")
    .arg(
      Arg::with_name("IMAGE")
        .help("Memory image, loaded at 0x0000")
        .required(true)
        .index(1),
    )
    .arg(
      Arg::with_name("start")
        .long("start")
        .takes_value(true)
        .value_name("ADDR")
        .help("Initial instruction pointer (default 0)"),
    )
    .arg(
      Arg::with_name("screen")
        .long("screen")
        .help("Map the terminal screen over 0x3000-0x30ff"),
    )
    .arg(
      Arg::with_name("max-steps")
        .long("max-steps")
        .takes_value(true)
        .value_name("N")
        .help("Give up after N instructions"),
    )
    .arg(
      Arg::with_name("dump")
        .long("dump")
        .help("Print the registers when the run ends"),
    )
    .get_matches();

  let path = matches.value_of("IMAGE").unwrap_or_default();
  let image =
    fs::read(path).with_context(|| format!("failed to read {}", path))?;
  info!("loaded {} bytes from {}", image.len(), path);

  let mut mem = Memory::new();
  mem.map(
    Box::new(Ram::from_image(&image, MEMORY_SIZE)?),
    0x0000,
    0xffff,
    true,
  );
  if matches.is_present("screen") {
    mem.map(Box::new(Screen::stdout()), SCREEN_START, SCREEN_END, true);
  }

  let mut cpu = Cpu::new(mem);
  if let Some(start) = matches.value_of("start") {
    let start = parse_number(start)?;
    if start > 0xffff {
      bail!("start address 0x{:x} is out of range", start);
    }
    cpu.set_register("ip", start as u16)?;
  }

  let result = match matches.value_of("max-steps") {
    Some(n) => cpu.run_for(parse_number(n)?),
    None => cpu.run().map(|_| true),
  };

  if matches.is_present("dump") {
    print!("{}", cpu.regs);
    println!("{}", cpu.view_memory_at(cpu.regs.ip(), 8).unwrap_or_default());
  }

  if !result.context("machine fault")? {
    bail!("step limit reached without halting");
  }
  Ok(())
}
