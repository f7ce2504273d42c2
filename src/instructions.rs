/// Grow a repetitive text from `seed` by following `instructions`.
///
/// Instructions are read two bytes at a time: `(i, j)` with `i < 128`
/// re-appends up to `j % 16` symbols copied from position `i`, `i < 192`
/// appends a run of `i % 8` copies of the seed's `j`-th symbol, anything
/// else swaps two neighbours. Long repeats make many radius-doubling rounds
/// end in tied ranks.
pub fn apply_instructions(seed: &[u8], instructions: &[u8]) -> Vec<u8> {
    use std::cmp::min;
    let mut text = seed.to_vec();
    if text.is_empty() {
        return text;
    }

    for couple in instructions.chunks_exact(2) {
        let (i, j) = (couple[0], couple[1]);

        if i < 128 {
            let pos = (i as usize) % text.len();
            let end = min(pos + (j as usize) % 16, text.len());
            text.extend_from_within(pos..end);
        } else if i < 192 {
            let c = seed[(j as usize) % seed.len()];
            text.extend(std::iter::repeat_n(c, (i % 8) as usize));
        } else if text.len() > 1 {
            let a = (j as usize) % text.len();
            let b = (a + 1) % text.len();
            text.swap(a, b);
        }
    }
    text
}
