//! Common

use crate::pbrt::*;

/// Reconstruction filter function Lanczos (sinc) that works on x in (0, 1].
///
/// * `x`   - Distance.
/// * `tau` - Number of cycles the sinc function passes through before it is
///           clamped to 0. Use default of 2.0.
pub fn lanczos(x: Float, tau: Float) -> Float {
    let mut x = abs(x);
    if x < 1e-5 {
        1.0
    } else if x > 1.0 {
        0.0
    } else {
        x *= PI;
        let s = (x * tau).sin() / (x * tau);
        let lanczos = x.sin() / x;
        s * lanczos
    }
}
