use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A random lowercase base-36 string of `length` characters.
pub fn random_base36(length: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
