use rand_jump::*;
use std::io::Write;

// Streams raw generator output to stdout for external statistical test
// batteries (PractRand, TestU01). Pick the generator by name:
//
//   cargo run --release -- jkiss | RNG_test stdin64

fn stream<G: JumpRng>(mut rng: G) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    let mut v: Vec<u8> = Vec::new();
    loop {
        let x = rng.next64();
        v.extend_from_slice(&x.to_le_bytes());
        if v.len() >= 0x10000 {
            stdout.write_all(v.as_slice())?;
            v.clear();
        }
    }
}

fn main() -> std::io::Result<()> {
    match std::env::args().nth(1).as_deref() {
        Some("jkiss") => stream(Jkiss::new()),
        Some("jlkiss") => stream(Jlkiss::new()),
        Some("jlkiss64") => stream(Jlkiss64::new()),
        Some("lfsr88") => stream(Lfsr88::new()),
        Some("lfsr113") => stream(Lfsr113::new()),
        Some("lfsr258") => stream(Lfsr258::new()),
        _ => stream(Kiss::new()),
    }
}
