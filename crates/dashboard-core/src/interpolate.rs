/// Fill gaps in a sparse series by linear interpolation.
///
/// Known points are never altered. Interior runs of `None` are bridged
/// linearly between the bounding known values; leading and trailing runs
/// take the nearest known value. An all-`None` series is returned as-is,
/// which also makes the function idempotent.
pub fn interpolate(seq: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut result = seq.to_vec();
    for i in 0..result.len() {
        if result[i].is_some() {
            continue;
        }
        let prev = result[..i]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(j, v)| v.map(|val| (j, val)));
        let next = result[i + 1..]
            .iter()
            .enumerate()
            .find_map(|(j, v)| v.map(|val| (i + 1 + j, val)));

        result[i] = match (prev, next) {
            (Some((pi, pv)), Some((ni, nv))) => {
                let step = (nv - pv) / (ni - pi) as f64;
                Some(pv + step * (i - pi) as f64)
            }
            (Some((_, pv)), None) => Some(pv),
            (None, Some((_, nv))) => Some(nv),
            (None, None) => None,
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn output_has_input_length() {
        for len in 0..6 {
            let seq = vec![None; len];
            assert_eq!(interpolate(&seq).len(), len);
        }
    }

    #[test]
    fn known_points_are_untouched() {
        let seq = vec![Some(1.0), None, Some(3.0), None, Some(-2.0)];
        let out = interpolate(&seq);
        assert_eq!(out[0], Some(1.0));
        assert_eq!(out[2], Some(3.0));
        assert_eq!(out[4], Some(-2.0));
    }

    #[test]
    fn interior_gaps_are_linear_and_edges_extend() {
        let seq = vec![None, Some(10.0), None, None, Some(40.0), None];
        let out = interpolate(&seq);
        let expected = [10.0, 10.0, 20.0, 30.0, 40.0, 40.0];
        for (got, want) in out.iter().zip(expected) {
            assert_relative_eq!(got.unwrap(), want, epsilon = 1e-9);
        }
    }

    #[test]
    fn all_none_stays_all_none() {
        let seq = vec![None, None, None];
        assert_eq!(interpolate(&seq), seq);
    }

    #[test]
    fn empty_input() {
        assert_eq!(interpolate(&[]), Vec::<Option<f64>>::new());
    }

    #[test]
    fn idempotent() {
        let cases: Vec<Vec<Option<f64>>> = vec![
            vec![None, Some(10.0), None, None, Some(40.0), None],
            vec![None, None, None],
            vec![Some(5.0)],
            vec![None, Some(-1.0), Some(2.0), None],
        ];
        for seq in cases {
            let once = interpolate(&seq);
            let twice = interpolate(&once);
            assert_eq!(once, twice);
        }
    }
}
