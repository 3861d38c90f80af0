use std::hint::black_box;

/// Busy loop of `iterations` steps that the optimiser cannot remove.
///
/// Returns the loop counter so callers can feed it to `black_box` as well.
pub fn spin(iterations: u64) -> u64 {
    let mut counter = 0_u64;
    for step in 0..iterations {
        counter = black_box(counter.wrapping_add(black_box(step) & 1));
    }
    counter
}
