//! Binary CART tree with Gini impurity and mean-decrease-in-impurity importances.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;

const MIN_IMPURITY_DECREASE: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Candidate features drawn per split
    pub max_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        /// Share of malicious samples that reached this leaf
        p_malicious: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Weighted child impurity
    impurity: f64,
}

fn class_counts(y: ArrayView1<u8>, indices: &[usize]) -> [usize; 2] {
    let mut c = [0usize; 2];
    for &i in indices {
        c[(y[i] != 0) as usize] += 1;
    }
    c
}

fn gini(counts: [usize; 2]) -> f64 {
    let n = (counts[0] + counts[1]) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / n;
    let p1 = counts[1] as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}

struct Builder<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, u8>,
    params: TreeParams,
    total: f64,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl<'a> Builder<'a> {
    fn leaf(&mut self, counts: [usize; 2]) -> usize {
        let n = counts[0] + counts[1];
        let p_malicious = if n == 0 {
            0.0
        } else {
            counts[1] as f64 / n as f64
        };
        self.nodes.push(Node::Leaf { p_malicious });
        self.nodes.len() - 1
    }

    fn best_split(&self, indices: &[usize], features: &[usize]) -> Option<BestSplit> {
        let n = indices.len();
        let mut best: Option<BestSplit> = None;
        let mut sorted = indices.to_vec();
        for &f in features {
            sorted.sort_by(|&a, &b| self.x[[a, f]].total_cmp(&self.x[[b, f]]));
            let total = class_counts(self.y, &sorted);
            let mut left = [0usize; 2];
            for k in 0..n - 1 {
                left[(self.y[sorted[k]] != 0) as usize] += 1;
                let v = self.x[[sorted[k], f]];
                let next = self.x[[sorted[k + 1], f]];
                if v >= next {
                    continue;
                }
                let right = [total[0] - left[0], total[1] - left[1]];
                let nl = (k + 1) as f64;
                let nr = (n - k - 1) as f64;
                let impurity = (nl * gini(left) + nr * gini(right)) / n as f64;
                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(BestSplit {
                        feature: f,
                        threshold: v + (next - v) / 2.0,
                        impurity,
                    });
                }
            }
        }
        best
    }

    fn build(&mut self, indices: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let counts = class_counts(self.y, &indices);
        let impurity = gini(counts);
        if depth >= self.params.max_depth
            || indices.len() < self.params.min_samples_split.max(2)
            || impurity == 0.0
        {
            return self.leaf(counts);
        }

        let n_features = self.x.ncols();
        let features =
            rand::seq::index::sample(rng, n_features, self.params.max_features.min(n_features))
                .into_vec();
        let split = match self.best_split(&indices, &features) {
            Some(s) if impurity - s.impurity > MIN_IMPURITY_DECREASE => s,
            _ => return self.leaf(counts),
        };

        let weight = indices.len() as f64 / self.total;
        self.importances[split.feature] += weight * (impurity - split.impurity);

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.x[[i, split.feature]] <= split.threshold);

        // Reserve the split slot so children get higher ids
        self.nodes.push(Node::Leaf { p_malicious: 0.0 });
        let id = self.nodes.len() - 1;
        let left = self.build(left_idx, depth + 1, rng);
        let right = self.build(right_idx, depth + 1, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }
}

impl DecisionTree {
    /// Grow a tree over `indices` (may repeat, as in a bootstrap sample).
    pub fn fit<'a>(
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, u8>,
        indices: Vec<usize>,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut builder = Builder {
            x,
            y,
            params,
            total: indices.len().max(1) as f64,
            nodes: Vec::new(),
            importances: vec![0.0; x.ncols()],
        };
        builder.build(indices, 0, rng);

        let mut importances = builder.importances;
        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            importances.iter_mut().for_each(|v| *v /= sum);
        }
        Self {
            nodes: builder.nodes,
            importances,
        }
    }

    pub fn predict_proba(&self, row: ArrayView1<f64>) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { p_malicious } => return *p_malicious,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Normalized to sum 1, or all zero when the tree never split
    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}
