// crates/dci-classify/src/linear.rs
//
// L2-regularized logistic regression over projected DCI spaces.
//
// Training is delegated to smartcore's LBFGS logistic regression with
// penalty `alpha = 1 / C`. The fitted coefficients and intercept are kept
// so scoring needs neither the training data nor the smartcore model.

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix as LinalgMatrix;
use smartcore::linear::logistic_regression::{
    LogisticRegression, LogisticRegressionParameters,
};

use dci_core::{DciError, DenseMatrix, Label, MarginClassifier, RowAccess};

/// Training parameters for [`LinearClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Inverse regularization strength. Default: 1.0.
    pub c: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self { c: 1.0 }
    }
}

/// A linear binary classifier. Label 1 is the positive class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearClassifier {
    params: ClassifierParams,
    weights: Vec<f64>,
    bias: f64,
    fitted: bool,
}

impl LinearClassifier {
    pub fn new(params: ClassifierParams) -> Self {
        Self {
            params,
            weights: Vec::new(),
            bias: 0.0,
            fitted: false,
        }
    }

    /// Default parameters with the given C.
    pub fn with_c(c: f64) -> Self {
        Self::new(ClassifierParams { c })
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Margin `w·x + b` of every row; positive means label 1.
    pub fn decision_function(&self, x: &DenseMatrix) -> Result<Vec<f64>, DciError> {
        if !self.fitted {
            return Err(DciError::Classifier(
                "classifier used before fit".to_string(),
            ));
        }
        if x.n_cols() != self.weights.len() {
            return Err(DciError::Shape(format!(
                "classifier trained on {} features applied to {}",
                self.weights.len(),
                x.n_cols()
            )));
        }
        Ok((0..x.n_rows())
            .map(|r| {
                self.weights
                    .iter()
                    .enumerate()
                    .map(|(c, w)| w * x.get(r, c))
                    .sum::<f64>()
                    + self.bias
            })
            .collect())
    }
}

/// Binary models hold a single coefficient row.
fn coefficient_vector(coefficients: &LinalgMatrix<f64>) -> Vec<f64> {
    let (rows, cols) = coefficients.shape();
    if rows == 1 {
        (0..cols).map(|c| *coefficients.get((0, c))).collect()
    } else {
        (0..rows).map(|r| *coefficients.get((r, 0))).collect()
    }
}

impl MarginClassifier for LinearClassifier {
    fn fit(&mut self, x: &DenseMatrix, y: &[Label]) -> Result<(), DciError> {
        let n = x.n_rows();
        if n == 0 {
            return Err(DciError::Classifier("no training rows".to_string()));
        }
        if y.len() != n {
            return Err(DciError::Shape(format!(
                "{} labels for {} training rows",
                y.len(),
                n
            )));
        }
        if !(self.params.c > 0.0) {
            return Err(DciError::Config(format!(
                "C must be positive, got {}",
                self.params.c
            )));
        }
        if y.iter().all(|&l| l == y[0]) {
            return Err(DciError::Classifier(format!(
                "training labels contain a single class ({})",
                y[0]
            )));
        }

        let targets: Vec<i32> = y.iter().map(|&l| i32::from(l)).collect();
        let parameters = LogisticRegressionParameters::default().with_alpha(1.0 / self.params.c);
        let model: LogisticRegression<f64, i32, LinalgMatrix<f64>, Vec<i32>> =
            LogisticRegression::fit(x.as_linalg(), &targets, parameters)
                .map_err(|e| DciError::Classifier(e.to_string()))?;

        let weights = coefficient_vector(model.coefficients());
        if weights.len() != x.n_cols() {
            return Err(DciError::Classifier(format!(
                "expected {} coefficients, model returned {}",
                x.n_cols(),
                weights.len()
            )));
        }
        self.bias = *model.intercept().get((0, 0));
        self.weights = weights;
        self.fitted = true;

        tracing::debug!(
            "Logistic regression trained: C={}, {} rows, {} features, bias {:.4}",
            self.params.c,
            n,
            x.n_cols(),
            self.bias
        );
        Ok(())
    }

    /// Probability of label 1: the logistic of the margin, 0.5 on the boundary.
    fn predict_scores(&self, x: &DenseMatrix) -> Result<Vec<f64>, DciError> {
        Ok(self
            .decision_function(x)?
            .into_iter()
            .map(|m| 1.0 / (1.0 + (-m).exp()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (DenseMatrix, Vec<Label>) {
        let x = DenseMatrix::from_rows(
            2,
            vec![
                vec![2.0, 1.0],
                vec![3.0, 0.5],
                vec![2.5, 2.0],
                vec![-2.0, -1.0],
                vec![-3.0, 0.0],
                vec![-2.5, -2.0],
            ],
        )
        .unwrap();
        (x, vec![1, 1, 1, 0, 0, 0])
    }

    fn norm(w: &[f64]) -> f64 {
        w.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    #[test]
    fn separates_linearly_separable_data() {
        let (x, y) = separable();
        let mut clf = LinearClassifier::with_c(1.0);
        clf.fit(&x, &y).unwrap();
        let scores = clf.predict_scores(&x).unwrap();
        for (s, &label) in scores.iter().zip(&y) {
            assert_eq!((*s > 0.5) as Label, label, "score {}", s);
        }
    }

    #[test]
    fn scores_are_probabilities_consistent_with_margins() {
        let (x, y) = separable();
        let mut clf = LinearClassifier::new(ClassifierParams::default());
        clf.fit(&x, &y).unwrap();
        let margins = clf.decision_function(&x).unwrap();
        let scores = clf.predict_scores(&x).unwrap();
        for (m, s) in margins.iter().zip(&scores) {
            assert!((0.0..=1.0).contains(s));
            assert_eq!(*m > 0.0, *s > 0.5);
        }
    }

    #[test]
    fn smaller_c_shrinks_weights() {
        let (x, y) = separable();
        let mut loose = LinearClassifier::with_c(100.0);
        let mut tight = LinearClassifier::with_c(0.01);
        loose.fit(&x, &y).unwrap();
        tight.fit(&x, &y).unwrap();
        assert!(norm(tight.weights()) < norm(loose.weights()));
    }

    #[test]
    fn training_is_deterministic() {
        let (x, y) = separable();
        let mut a = LinearClassifier::with_c(0.1);
        let mut b = LinearClassifier::with_c(0.1);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.bias(), b.bias());
    }

    #[test]
    fn single_class_is_rejected() {
        let (x, _) = separable();
        let mut clf = LinearClassifier::with_c(1.0);
        let err = clf.fit(&x, &[1; 6]).unwrap_err();
        assert!(matches!(err, DciError::Classifier(_)));
    }

    #[test]
    fn unfitted_or_mismatched_input_is_rejected() {
        let (x, y) = separable();
        let mut clf = LinearClassifier::with_c(1.0);
        assert!(clf.predict_scores(&x).is_err());
        clf.fit(&x, &y).unwrap();
        let wide = DenseMatrix::zeros(1, 3);
        assert!(matches!(clf.predict_scores(&wide), Err(DciError::Shape(_))));
    }

    #[test]
    fn non_positive_c_is_rejected() {
        let (x, y) = separable();
        let mut clf = LinearClassifier::with_c(0.0);
        assert!(matches!(clf.fit(&x, &y), Err(DciError::Config(_))));
    }
}
