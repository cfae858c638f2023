//! Percentage and grade calculations.
//!
//! The single home for every formula that used to be copy-pasted across
//! call sites. Attendance percentage uses the late-weighted ratio
//! (a late counts as half a presence); the plain present/total ratio is
//! intentionally not provided.

/// Attendance percentage: (present + 0.5 * late) / total * 100, rounded to
/// two decimals. Returns 0 for an empty slice.
pub fn attendance_percentage(present: u32, late: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = (present as f64 + 0.5 * late as f64) / total as f64 * 100.0;
    round2(pct)
}

/// Marks percentage, rounded to two decimals. Returns 0 when max is not
/// positive.
pub fn percentage(obtained: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    round2(obtained / max * 100.0)
}

/// Letter grade band for a percentage.
pub fn grade_for_percentage(pct: f64) -> &'static str {
    if pct >= 90.0 {
        "A+"
    } else if pct >= 80.0 {
        "A"
    } else if pct >= 70.0 {
        "B+"
    } else if pct >= 60.0 {
        "B"
    } else if pct >= 50.0 {
        "C"
    } else if pct >= 40.0 {
        "D"
    } else {
        "F"
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_percentage_weights_late_as_half() {
        // 1 present + 1 late + 2 absent: (1 + 0.5) / 4 = 37.5%
        assert_eq!(attendance_percentage(1, 1, 4), 37.5);
    }

    #[test]
    fn test_attendance_percentage_empty_slice_is_zero() {
        assert_eq!(attendance_percentage(0, 0, 0), 0.0);
    }

    #[test]
    fn test_attendance_percentage_rounds_to_two_decimals() {
        // 1 / 3 = 33.333... -> 33.33
        assert_eq!(attendance_percentage(1, 0, 3), 33.33);
        // (2 + 0.5) / 3 = 83.333... -> 83.33
        assert_eq!(attendance_percentage(2, 1, 3), 83.33);
    }

    #[test]
    fn test_marks_percentage() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_grade_bands_at_boundaries() {
        assert_eq!(grade_for_percentage(90.0), "A+");
        assert_eq!(grade_for_percentage(89.99), "A");
        assert_eq!(grade_for_percentage(80.0), "A");
        assert_eq!(grade_for_percentage(70.0), "B+");
        assert_eq!(grade_for_percentage(60.0), "B");
        assert_eq!(grade_for_percentage(50.0), "C");
        assert_eq!(grade_for_percentage(40.0), "D");
        assert_eq!(grade_for_percentage(39.99), "F");
        assert_eq!(grade_for_percentage(0.0), "F");
    }
}
