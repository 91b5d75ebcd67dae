//! Natural-language rendering of turn instructions.

/// Eight-way turn classification derived from the angle between the
/// incoming and outgoing edge bearings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Straight,
    SlightRight,
    Right,
    StrongRight,
    UTurn,
    StrongLeft,
    Left,
    SlightLeft,
}

/// Bucket table: 45-degree sectors centered on the compass octants,
/// starting at straight-ahead and proceeding clockwise.
const TURNS: [Turn; 8] = [
    Turn::Straight,
    Turn::SlightRight,
    Turn::Right,
    Turn::StrongRight,
    Turn::UTurn,
    Turn::StrongLeft,
    Turn::Left,
    Turn::SlightLeft,
];

impl Turn {
    /// Buckets a signed turn angle into its 45-degree sector.
    #[must_use]
    pub fn from_angle(angle_deg: f64) -> Self {
        let normalized = if angle_deg < 0.0 {
            angle_deg + 360.0
        } else {
            angle_deg
        };
        let bucket = (((normalized + 22.5) / 45.0).floor() as usize) % 8;
        TURNS[bucket]
    }
}

/// Leg lengths are displayed rounded to the nearest multiple of 5 meters.
fn display_length(length_m: f64) -> i64 {
    (5.0 * (length_m / 5.0).round()) as i64
}

/// Formats the instruction for one leg. `angle_deg` is absent on the
/// final stretch toward the destination.
#[must_use]
pub fn orientation_phrase(angle_deg: Option<f64>, length_m: f64, street: Option<&str>) -> String {
    let Some(angle) = angle_deg else {
        return "Keep going until your last checkpoint!".to_string();
    };

    let length = display_length(length_m);
    let street = street.unwrap_or("an unnamed street");

    match Turn::from_angle(angle) {
        Turn::Straight => format!("Go straight through {street} for {length} m"),
        Turn::SlightRight => format!("Turn slightly to the right in {length} m"),
        Turn::Right => format!("Turn to the right in {length} m"),
        Turn::StrongRight => format!("Turn strongly to the right in {length} m"),
        Turn::UTurn => format!("Turn back onto {street} and continue {length} m"),
        Turn::StrongLeft => format!("Turn strongly to the left in {length} m"),
        Turn::Left => format!("Turn to the left in {length} m"),
        Turn::SlightLeft => format!("Turn slightly to the left in {length} m"),
    }
}
