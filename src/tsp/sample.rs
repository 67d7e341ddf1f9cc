//! Worked example: road distances (km) between ten Namibian towns.

use super::distance::DistanceModel;
use crate::error::Result;

/// Town names, in matrix order. Windhoek is the customary start.
pub const NAMIBIAN_TOWNS: [&str; 10] = [
    "Windhoek",
    "Swakopmund",
    "Walvis Bay",
    "Otjiwarongo",
    "Tsumeb",
    "Grootfontein",
    "Mariental",
    "Keetmanshoop",
    "Ondangwa",
    "Oshakati",
];

/// Symmetric road distances in kilometres.
pub const NAMIBIAN_DISTANCES: [[f64; 10]; 10] = [
    [0.0, 361.0, 395.0, 249.0, 433.0, 459.0, 268.0, 497.0, 678.0, 712.0],
    [361.0, 0.0, 35.5, 379.0, 562.0, 589.0, 541.0, 859.0, 808.0, 779.0],
    [395.0, 35.5, 0.0, 413.0, 597.0, 623.0, 511.0, 732.0, 884.0, 855.0],
    [249.0, 379.0, 413.0, 0.0, 260.0, 183.0, 519.0, 768.0, 514.0, 485.0],
    [433.0, 562.0, 597.0, 260.0, 0.0, 60.0, 682.0, 921.0, 254.0, 288.0],
    [459.0, 589.0, 623.0, 183.0, 60.0, 0.0, 708.0, 947.0, 308.0, 342.0],
    [268.0, 541.0, 511.0, 519.0, 682.0, 708.0, 0.0, 231.0, 909.0, 981.0],
    [497.0, 859.0, 732.0, 768.0, 921.0, 947.0, 231.0, 0.0, 1175.0, 1210.0],
    [678.0, 808.0, 884.0, 514.0, 254.0, 308.0, 909.0, 1175.0, 0.0, 30.0],
    [712.0, 779.0, 855.0, 485.0, 288.0, 342.0, 981.0, 1210.0, 30.0, 0.0],
];

/// Distance model over [`NAMIBIAN_TOWNS`].
pub fn namibian_towns() -> Result<DistanceModel> {
    DistanceModel::new(
        NAMIBIAN_TOWNS,
        NAMIBIAN_DISTANCES.iter().map(|row| row.to_vec()).collect(),
    )
}
