//! Evenly spaced sample grids.

/// `count` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// `count` values spaced evenly in log10 space, from 10^start_exp to 10^end_exp.
pub fn logspace(start_exp: f64, end_exp: f64, count: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, count)
        .into_iter()
        .map(|exp| 10f64.powf(exp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let values = linspace(0.0, 100.0, 100);
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[99], 100.0);
        assert!((values[1] - 100.0 / 99.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
    }

    #[test]
    fn logspace_spans_decades() {
        let values = logspace(-6.0, 0.0, 7);
        assert_eq!(values.len(), 7);
        for (i, value) in values.iter().enumerate() {
            let expected = 10f64.powi(i as i32 - 6);
            assert!((value - expected).abs() / expected < 1e-12);
        }
    }
}
