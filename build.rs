use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use rand_mt::Mt64;

// 12 piece kinds * 64 squares, side to move, 4 castling rights, 8 en passant files
const ZOBRIST_KEY_COUNT: usize = 781;

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let zobrist_file = Path::new(&out_dir).join("zobrist_keys.rs");
    let mut file = File::create(zobrist_file).unwrap();

    writeln!(&mut file, "impl ZobristHasher {{").unwrap();
    inject_array(
        &mut file,
        &format!("pub const ZOBRIST_KEYS: [u64; {}]", ZOBRIST_KEY_COUNT),
        &initialize_zobrist_keys(),
    );
    writeln!(&mut file, "}}").unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}

fn inject_array<T: ToString>(file: &mut File, declaration: &str, array: &[T]) {
    writeln!(file, "{} = [", declaration).unwrap();
    for value in array {
        write!(file, "{}, ", value.to_string()).unwrap();
    }
    writeln!(file, "];").unwrap();
}

// Unseeded on purpose: hashes must be identical from one build to the next
fn initialize_zobrist_keys() -> [u64; ZOBRIST_KEY_COUNT] {
    let mut rng = Mt64::new_unseeded();
    [0u64; ZOBRIST_KEY_COUNT].map(|_| rng.next_u64())
}
