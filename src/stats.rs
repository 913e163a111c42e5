// 📐 Descriptive statistics over small in-memory columns

/// Sum of a column
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean; `None` for an empty column
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(sum(values) / values.len() as f64)
    }
}

/// Index of the largest value. The first maximal index wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Largest value of a column
pub fn max(values: &[f64]) -> Option<f64> {
    argmax(values).map(|i| values[i])
}

/// Smallest value of a column
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().fold(None, |acc, v| match acc {
        Some(m) if m <= v => Some(m),
        _ => Some(v),
    })
}

/// Percentage change from `first` to `last`; `None` when `first` is zero
pub fn pct_change(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        None
    } else {
        Some((last / first - 1.0) * 100.0)
    }
}

/// Round to one decimal, half away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_mean() {
        let v = [45000.0, 52000.0, 48000.0, 61000.0, 58000.0, 67000.0];
        assert_eq!(sum(&v), 331000.0);
        let m = mean(&v).unwrap();
        assert!((m - 55166.666).abs() < 0.01);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
        assert_eq!(max(&[4.0, 9.0, 2.0]), Some(9.0));
        assert_eq!(min(&[4.0, 9.0, 2.0]), Some(2.0));
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn test_pct_change() {
        let growth = pct_change(45000.0, 67000.0).unwrap();
        assert!((growth - 48.888).abs() < 0.01);
        assert_eq!(pct_change(0.0, 10.0), None);
        assert_eq!(pct_change(5.0, 5.0), Some(0.0));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(37.777), 37.8);
        assert_eq!(round1(40.384), 40.4);
        assert_eq!(round1(-1.25), -1.3);
    }
}
