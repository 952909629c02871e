use crate::HessianField;

/// Flattened lattice with a per-point validity mask.
///
/// A point survives only if all four Hessian components are finite;
/// infinities count as missing. The gradient is never filtered on its own:
/// callers index it with the same surviving point list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointSet {
    valid: Vec<bool>,
    indices: Vec<usize>,
}

impl PointSet {
    pub fn from_hessian(hessian: &HessianField) -> Self {
        let valid: Vec<bool> = hessian
            .values
            .iter()
            .map(|h| h.iter().all(|v| v.is_finite()))
            .collect();
        let indices = valid
            .iter()
            .enumerate()
            .filter(|&(_, &ok)| ok)
            .map(|(k, _)| k)
            .collect();
        Self { valid, indices }
    }

    /// Linear lattice indices of surviving points, in row-major order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn is_valid(&self, k: usize) -> bool {
        self.valid[k]
    }

    /// Total number of lattice points, dropped ones included.
    #[inline]
    pub fn lattice_len(&self) -> usize {
        self.valid.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.lattice_len() - self.len()
    }

    /// Spread per-surviving-point values back over the lattice; dropped
    /// points become NaN.
    pub fn scatter(&self, values: &[f64]) -> Vec<f64> {
        debug_assert_eq!(values.len(), self.indices.len());
        let mut out = vec![f64::NAN; self.valid.len()];
        for (&k, &v) in self.indices.iter().zip(values) {
            out[k] = v;
        }
        out
    }
}
