use serde::Serialize;

use crate::error::{Result, SetupError};

/// Point source of surface meltwater.
/// Coordinates in meters, discharge `q` in m^3/s.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Moulin {
    pub id: u16,
    pub x: f64,
    pub y: f64,
    pub q: f64,
}

const fn m(id: u16, x: f64, y: f64, q: f64) -> Moulin {
    Moulin { id, x, y, q }
}

/// Variant numbers accepted by `select_variant`.
pub const VARIANTS: std::ops::RangeInclusive<i64> = 1..=5;

/// Moulin layout for an experiment B variant.
/// Variants 1-5 spread the same 90 m^3/s over 1, 10, 20, 50 and 100 moulins.
pub fn select_variant(number: i64) -> Result<&'static [Moulin]> {
    match number {
        1 => Ok(&VARIANT_1),
        2 => Ok(&VARIANT_2),
        3 => Ok(&VARIANT_3),
        4 => Ok(&VARIANT_4),
        5 => Ok(&VARIANT_5),
        _ => Err(SetupError::UndefinedVariant(number)),
    }
}

/// Total discharge (m^3/s) of a moulin set.
pub fn total_discharge(moulins: &[Moulin]) -> f64 {
    moulins.iter().map(|m| m.q).sum()
}

static VARIANT_1: [Moulin; 1] = [
    m(0, 59000.0, 8000.0, 90.0),
];

static VARIANT_2: [Moulin; 10] = [
    m(0, 30000.0, 3000.0, 9.0),
    m(1, 8000.0, 4000.0, 9.0),
    m(2, 60000.0, 7000.0, 9.0),
    m(3, 35000.0, 9000.0, 9.0),
    m(4, 46000.0, 10000.0, 9.0),
    m(5, 26000.0, 11000.0, 9.0),
    m(6, 7000.0, 12000.0, 9.0),
    m(7, 5000.0, 14000.0, 9.0),
    m(8, 9000.0, 14000.0, 9.0),
    m(9, 39000.0, 16000.0, 9.0),
];

static VARIANT_3: [Moulin; 20] = [
    m(0, 35000.0, 2000.0, 4.5),
    m(1, 5000.0, 3000.0, 4.5),
    m(2, 84000.0, 3000.0, 4.5),
    m(3, 97000.0, 3000.0, 4.5),
    m(4, 10000.0, 5000.0, 4.5),
    m(5, 5000.0, 6000.0, 4.5),
    m(6, 44000.0, 9000.0, 4.5),
    m(7, 47000.0, 9000.0, 4.5),
    m(8, 20000.0, 10000.0, 4.5),
    m(9, 33000.0, 11000.0, 4.5),
    m(10, 19000.0, 12000.0, 4.5),
    m(11, 33000.0, 14000.0, 4.5),
    m(12, 75000.0, 14000.0, 4.5),
    m(13, 13000.0, 15000.0, 4.5),
    m(14, 37000.0, 15000.0, 4.5),
    m(15, 5000.0, 16000.0, 4.5),
    m(16, 12000.0, 16000.0, 4.5),
    m(17, 5000.0, 17000.0, 4.5),
    m(18, 67000.0, 17000.0, 4.5),
    m(19, 69000.0, 18000.0, 4.5),
];

static VARIANT_4: [Moulin; 50] = [
    m(0, 14000.0, 1000.0, 1.8),
    m(1, 26000.0, 1000.0, 1.8),
    m(2, 82000.0, 1000.0, 1.8),
    m(3, 23000.0, 2000.0, 1.8),
    m(4, 55000.0, 2000.0, 1.8),
    m(5, 73000.0, 2000.0, 1.8),
    m(6, 98000.0, 2000.0, 1.8),
    m(7, 36000.0, 3000.0, 1.8),
    m(8, 23000.0, 4000.0, 1.8),
    m(9, 62000.0, 4000.0, 1.8),
    m(10, 10000.0, 5000.0, 1.8),
    m(11, 29000.0, 5000.0, 1.8),
    m(12, 51000.0, 5000.0, 1.8),
    m(13, 88000.0, 5000.0, 1.8),
    m(14, 9000.0, 6000.0, 1.8),
    m(15, 23000.0, 6000.0, 1.8),
    m(16, 63000.0, 6000.0, 1.8),
    m(17, 79000.0, 6000.0, 1.8),
    m(18, 82000.0, 6000.0, 1.8),
    m(19, 5000.0, 7000.0, 1.8),
    m(20, 6000.0, 7000.0, 1.8),
    m(21, 8000.0, 7000.0, 1.8),
    m(22, 10000.0, 7000.0, 1.8),
    m(23, 34000.0, 8000.0, 1.8),
    m(24, 12000.0, 9000.0, 1.8),
    m(25, 8000.0, 10000.0, 1.8),
    m(26, 12000.0, 10000.0, 1.8),
    m(27, 22000.0, 10000.0, 1.8),
    m(28, 93000.0, 10000.0, 1.8),
    m(29, 20000.0, 11000.0, 1.8),
    m(30, 74000.0, 11000.0, 1.8),
    m(31, 6000.0, 12000.0, 1.8),
    m(32, 22000.0, 12000.0, 1.8),
    m(33, 64000.0, 12000.0, 1.8),
    m(34, 65000.0, 12000.0, 1.8),
    m(35, 5000.0, 13000.0, 1.8),
    m(36, 8000.0, 13000.0, 1.8),
    m(37, 15000.0, 13000.0, 1.8),
    m(38, 52000.0, 13000.0, 1.8),
    m(39, 5000.0, 14000.0, 1.8),
    m(40, 6000.0, 14000.0, 1.8),
    m(41, 11000.0, 14000.0, 1.8),
    m(42, 80000.0, 14000.0, 1.8),
    m(43, 12000.0, 15000.0, 1.8),
    m(44, 88000.0, 15000.0, 1.8),
    m(45, 16000.0, 16000.0, 1.8),
    m(46, 5000.0, 18000.0, 1.8),
    m(47, 12000.0, 18000.0, 1.8),
    m(48, 57000.0, 18000.0, 1.8),
    m(49, 86000.0, 18000.0, 1.8),
];

static VARIANT_5: [Moulin; 100] = [
    m(0, 5000.0, 1000.0, 0.9),
    m(1, 8000.0, 1000.0, 0.9),
    m(2, 27000.0, 1000.0, 0.9),
    m(3, 44000.0, 1000.0, 0.9),
    m(4, 75000.0, 1000.0, 0.9),
    m(5, 78000.0, 1000.0, 0.9),
    m(6, 94000.0, 1000.0, 0.9),
    m(7, 11000.0, 2000.0, 0.9),
    m(8, 29000.0, 2000.0, 0.9),
    m(9, 43000.0, 2000.0, 0.9),
    m(10, 56000.0, 2000.0, 0.9),
    m(11, 65000.0, 2000.0, 0.9),
    m(12, 68000.0, 2000.0, 0.9),
    m(13, 77000.0, 2000.0, 0.9),
    m(14, 6000.0, 3000.0, 0.9),
    m(15, 90000.0, 3000.0, 0.9),
    m(16, 99000.0, 3000.0, 0.9),
    m(17, 6000.0, 4000.0, 0.9),
    m(18, 8000.0, 4000.0, 0.9),
    m(19, 12000.0, 4000.0, 0.9),
    m(20, 21000.0, 4000.0, 0.9),
    m(21, 50000.0, 4000.0, 0.9),
    m(22, 56000.0, 4000.0, 0.9),
    m(23, 67000.0, 4000.0, 0.9),
    m(24, 89000.0, 4000.0, 0.9),
    m(25, 6000.0, 5000.0, 0.9),
    m(26, 13000.0, 5000.0, 0.9),
    m(27, 14000.0, 5000.0, 0.9),
    m(28, 23000.0, 5000.0, 0.9),
    m(29, 32000.0, 5000.0, 0.9),
    m(30, 40000.0, 5000.0, 0.9),
    m(31, 52000.0, 5000.0, 0.9),
    m(32, 5000.0, 6000.0, 0.9),
    m(33, 19000.0, 6000.0, 0.9),
    m(34, 31000.0, 6000.0, 0.9),
    m(35, 32000.0, 6000.0, 0.9),
    m(36, 64000.0, 6000.0, 0.9),
    m(37, 57000.0, 7000.0, 0.9),
    m(38, 66000.0, 7000.0, 0.9),
    m(39, 94000.0, 7000.0, 0.9),
    m(40, 5000.0, 8000.0, 0.9),
    m(41, 41000.0, 8000.0, 0.9),
    m(42, 5000.0, 9000.0, 0.9),
    m(43, 6000.0, 9000.0, 0.9),
    m(44, 8000.0, 9000.0, 0.9),
    m(45, 20000.0, 9000.0, 0.9),
    m(46, 22000.0, 9000.0, 0.9),
    m(47, 28000.0, 9000.0, 0.9),
    m(48, 61000.0, 9000.0, 0.9),
    m(49, 64000.0, 9000.0, 0.9),
    m(50, 71000.0, 9000.0, 0.9),
    m(51, 5000.0, 10000.0, 0.9),
    m(52, 12000.0, 10000.0, 0.9),
    m(53, 15000.0, 10000.0, 0.9),
    m(54, 20000.0, 10000.0, 0.9),
    m(55, 30000.0, 10000.0, 0.9),
    m(56, 73000.0, 10000.0, 0.9),
    m(57, 88000.0, 10000.0, 0.9),
    m(58, 5000.0, 11000.0, 0.9),
    m(59, 8000.0, 11000.0, 0.9),
    m(60, 47000.0, 11000.0, 0.9),
    m(61, 79000.0, 11000.0, 0.9),
    m(62, 14000.0, 12000.0, 0.9),
    m(63, 17000.0, 12000.0, 0.9),
    m(64, 31000.0, 12000.0, 0.9),
    m(65, 91000.0, 12000.0, 0.9),
    m(66, 5000.0, 13000.0, 0.9),
    m(67, 7000.0, 13000.0, 0.9),
    m(68, 10000.0, 13000.0, 0.9),
    m(69, 15000.0, 13000.0, 0.9),
    m(70, 34000.0, 13000.0, 0.9),
    m(71, 41000.0, 13000.0, 0.9),
    m(72, 49000.0, 13000.0, 0.9),
    m(73, 54000.0, 13000.0, 0.9),
    m(74, 5000.0, 14000.0, 0.9),
    m(75, 11000.0, 14000.0, 0.9),
    m(76, 13000.0, 14000.0, 0.9),
    m(77, 37000.0, 14000.0, 0.9),
    m(78, 58000.0, 14000.0, 0.9),
    m(79, 5000.0, 15000.0, 0.9),
    m(80, 13000.0, 15000.0, 0.9),
    m(81, 14000.0, 15000.0, 0.9),
    m(82, 17000.0, 15000.0, 0.9),
    m(83, 23000.0, 16000.0, 0.9),
    m(84, 30000.0, 16000.0, 0.9),
    m(85, 38000.0, 16000.0, 0.9),
    m(86, 39000.0, 16000.0, 0.9),
    m(87, 55000.0, 16000.0, 0.9),
    m(88, 57000.0, 16000.0, 0.9),
    m(89, 5000.0, 17000.0, 0.9),
    m(90, 13000.0, 17000.0, 0.9),
    m(91, 22000.0, 17000.0, 0.9),
    m(92, 54000.0, 17000.0, 0.9),
    m(93, 83000.0, 17000.0, 0.9),
    m(94, 5000.0, 18000.0, 0.9),
    m(95, 12000.0, 18000.0, 0.9),
    m(96, 47000.0, 18000.0, 0.9),
    m(97, 53000.0, 18000.0, 0.9),
    m(98, 74000.0, 18000.0, 0.9),
    m(99, 94000.0, 18000.0, 0.9),
];
#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    #[test]
    fn variant_sizes() {
        let counts: Vec<usize> = VARIANTS
            .map(|n| select_variant(n).unwrap().len())
            .collect();
        assert_eq!(counts, vec![1, 10, 20, 50, 100]);
    }

    #[test]
    fn total_input_is_the_same_for_every_variant() {
        let reference = total_discharge(select_variant(1).unwrap());
        assert_approx(reference, 90.0, 1e-9);
        for n in VARIANTS {
            assert_approx(total_discharge(select_variant(n).unwrap()), reference, 1e-9);
        }
    }

    #[test]
    fn ids_are_sequential() {
        for n in VARIANTS {
            for (i, m) in select_variant(n).unwrap().iter().enumerate() {
                assert_eq!(m.id as usize, i, "variant {n}");
            }
        }
    }

    #[test]
    fn single_moulin_variant() {
        let v1 = select_variant(1).unwrap();
        assert_eq!(v1[0], m(0, 59000.0, 8000.0, 90.0));
    }

    #[test]
    fn undefined_variants_rejected() {
        for n in [0, 6, -1, 42] {
            match select_variant(n) {
                Err(SetupError::UndefinedVariant(v)) => assert_eq!(v, n),
                other => panic!("variant {n}: expected error, got {other:?}"),
            }
        }
    }
}
