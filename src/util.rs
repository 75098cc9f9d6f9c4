use std::fs;
use std::io::Write;
use std::path::Path;

use crate::thresholds::DISTANCE_DECIMALS;

/// Scale factor for binning distances (10^DISTANCE_DECIMALS).
fn bin_scale() -> f64 {
    10f64.powi(DISTANCE_DECIMALS)
}

/// Integer bin for a distance: the distance rounded to two decimals, in
/// hundredths.
///
/// Rounding is decided on the stored value, not on the scaled product: 1.115
/// is stored just below 1.115, so it bins to 111 even though `1.115 * 100`
/// comes out as exactly 111.5. Only exact ties (0.125) round to even.
pub fn distance_bin(distance: f64) -> i64 {
    let scale = bin_scale();
    let scaled = distance * scale;
    // exact error of the multiplication above
    let residual = distance.mul_add(scale, -scaled);
    let floor = scaled.floor();
    let bin = if scaled - floor == 0.5 && residual != 0.0 {
        if residual > 0.0 {
            floor + 1.0
        } else {
            floor
        }
    } else {
        scaled.round_ties_even()
    };
    bin as i64
}

/// Distance value of a bin.
pub fn bin_value(bin: i64) -> f64 {
    bin as f64 / bin_scale()
}

/// Round a distance to two decimals.
pub fn round_distance(distance: f64) -> f64 {
    bin_value(distance_bin(distance))
}

/// Replace `path` with `bytes` in one step: write a sibling temp file, then rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let mut f = fs::File::create(&tmp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    drop(f);
    fs::rename(&tmp, path)
}
