//! Min-cost transport engine: exact shipment plans via successive shortest paths

use tracing::debug;

use crate::domain::{
    EquRecord, Parameter, ScenarioData, Solution, SolvedEquation, SolvedVariable, VarRecord, Year,
};
use crate::solver::OptimizationEngine;

/// Capacities and flows below this are treated as zero.
const EPS: f64 = 1e-9;

/// Bundled engine for the conventional transport schema.
///
/// Expects sets `supplier`, `market`, `year` and parameters
/// `supply(node, year)`, `demand(node, year)`, `var_cost(node_loc, node_dest,
/// year)`. Each model year is solved independently as a bipartite min-cost
/// flow; routes without a `var_cost` row do not exist. Produces the shipment
/// variable `ACT(node_loc, node_dest, year)`, per-market `DEMAND_BALANCE`
/// equation rows, and the scalar objective `OBJ`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransportEngine;

impl OptimizationEngine for TransportEngine {
    fn name(&self) -> &'static str {
        "transport"
    }

    fn solve(&self, model: &ScenarioData) -> Result<Solution, String> {
        let suppliers = model
            .set_members("supplier")
            .ok_or_else(|| "scenario has no `supplier` set".to_string())?;
        let markets = model
            .set_members("market")
            .ok_or_else(|| "scenario has no `market` set".to_string())?;
        let years = model.model_years()?;
        if years.is_empty() {
            return Err("no model years at or after the first model year".to_string());
        }
        let supply = required_parameter(model, "supply")?;
        let demand = required_parameter(model, "demand")?;
        let var_cost = required_parameter(model, "var_cost")?;

        let activity_unit = supply
            .rows()
            .first()
            .map(|r| r.unit.clone())
            .unwrap_or_default();

        let mut act_records = Vec::new();
        let mut balance_records = Vec::new();
        let mut objective = 0.0;

        for &year in &years {
            let plan = YearPlan::build(suppliers, markets, supply, demand, var_cost, year)?;
            let solved = plan.solve()?;
            objective += solved.cost;

            for (si, s) in suppliers.iter().enumerate() {
                for (mi, m) in markets.iter().enumerate() {
                    let Some(flow) = solved.flows[si][mi] else {
                        continue;
                    };
                    act_records.push(VarRecord {
                        keys: vec![s.clone(), m.clone()],
                        year: Some(year),
                        lvl: flow,
                        mrg: 0.0,
                        unit: activity_unit.clone(),
                    });
                }
            }
            for (mi, m) in markets.iter().enumerate() {
                balance_records.push(EquRecord {
                    keys: vec![m.clone()],
                    year: Some(year),
                    lvl: solved.delivered[mi],
                    mrg: solved.prices[mi],
                });
            }
        }

        debug!(objective, years = years.len(), "transport model solved");

        Ok(Solution::new(
            vec![
                SolvedVariable {
                    name: "ACT".to_string(),
                    dims: vec!["node_loc".to_string(), "node_dest".to_string()],
                    records: act_records,
                },
                SolvedVariable {
                    name: "OBJ".to_string(),
                    dims: vec![],
                    records: vec![VarRecord {
                        keys: vec![],
                        year: None,
                        lvl: objective,
                        mrg: 0.0,
                        unit: "USD".to_string(),
                    }],
                },
            ],
            vec![SolvedEquation {
                name: "DEMAND_BALANCE".to_string(),
                dims: vec!["node".to_string()],
                records: balance_records,
            }],
        ))
    }
}

fn required_parameter<'a>(model: &'a ScenarioData, name: &str) -> Result<&'a Parameter, String> {
    model
        .parameter(name)
        .ok_or_else(|| format!("scenario has no `{name}` parameter"))
}

/// One year's bipartite problem, ready to run.
struct YearPlan {
    network: FlowNetwork,
    /// Node index per market; source is 0, sink is last.
    market_nodes: Vec<usize>,
    /// Arc position of each existing route, `None` where no cost is defined.
    routes: Vec<Vec<Option<(usize, usize)>>>,
    total_demand: f64,
}

struct SolvedYear {
    cost: f64,
    /// Flow per supplier and market, `None` where the route does not exist.
    flows: Vec<Vec<Option<f64>>>,
    delivered: Vec<f64>,
    prices: Vec<f64>,
}

impl YearPlan {
    fn build(
        suppliers: &[String],
        markets: &[String],
        supply: &Parameter,
        demand: &Parameter,
        var_cost: &Parameter,
        year: Year,
    ) -> Result<Self, String> {
        let n = suppliers.len() + markets.len() + 2;
        let source = 0;
        let sink = n - 1;
        let mut network = FlowNetwork::new(n);

        let supplier_nodes: Vec<usize> = (0..suppliers.len()).map(|i| i + 1).collect();
        let market_nodes: Vec<usize> = (0..markets.len()).map(|i| i + 1 + suppliers.len()).collect();

        let mut total_supply = 0.0;
        for (si, s) in suppliers.iter().enumerate() {
            let cap = supply
                .value(&[s.as_str()], year)
                .ok_or_else(|| format!("missing `supply` for node `{s}` in year {year}"))?;
            total_supply += cap;
            network.add_arc(source, supplier_nodes[si], cap, 0.0);
        }

        let mut total_demand = 0.0;
        for (mi, m) in markets.iter().enumerate() {
            let need = demand
                .value(&[m.as_str()], year)
                .ok_or_else(|| format!("missing `demand` for node `{m}` in year {year}"))?;
            total_demand += need;
            network.add_arc(market_nodes[mi], sink, need, 0.0);
        }

        if total_supply + EPS < total_demand {
            return Err(format!(
                "infeasible in year {year}: total supply {total_supply} is below total demand {total_demand}"
            ));
        }

        let mut routes = vec![vec![None; markets.len()]; suppliers.len()];
        for (si, s) in suppliers.iter().enumerate() {
            for (mi, m) in markets.iter().enumerate() {
                if let Some(cost) = var_cost.value(&[s.as_str(), m.as_str()], year) {
                    routes[si][mi] =
                        Some(network.add_arc(supplier_nodes[si], market_nodes[mi], total_demand, cost));
                }
            }
        }

        Ok(Self {
            network,
            market_nodes,
            routes,
            total_demand,
        })
    }

    fn solve(mut self) -> Result<SolvedYear, String> {
        let source = 0;
        let sink = self.network.node_count() - 1;
        let mut remaining = self.total_demand;
        let mut cost = 0.0;
        let mut last_dist: Vec<f64> = vec![0.0; self.network.node_count()];

        while remaining > EPS {
            let (path, dist) = self
                .network
                .cheapest_path(source, sink)
                .ok_or_else(|| "no route left to an unserved market".to_string())?;
            let bottleneck = self.network.bottleneck(&path).min(remaining);
            self.network.push(&path, bottleneck);
            cost += bottleneck * dist[sink];
            remaining -= bottleneck;
            last_dist = dist;
        }

        let flows = self
            .routes
            .iter()
            .map(|row| {
                row.iter()
                    .map(|route| route.map(|arc| self.network.flow(arc)))
                    .collect()
            })
            .collect();
        let delivered = self
            .market_nodes
            .iter()
            .enumerate()
            .map(|(mi, _)| {
                self.routes
                    .iter()
                    .filter_map(|row| row[mi].map(|arc| self.network.flow(arc)))
                    .sum()
            })
            .collect();
        // node potentials from the final price search; markets already cut
        // off from the residual keep their last finite potential
        let prices = self
            .market_nodes
            .iter()
            .map(|&node| {
                let d = last_dist[node];
                if d.is_finite() { d } else { 0.0 }
            })
            .collect();

        Ok(SolvedYear {
            cost,
            flows,
            delivered,
            prices,
        })
    }
}

struct Arc {
    to: usize,
    rev: usize,
    cap: f64,
    cost: f64,
}

/// Residual network for successive-shortest-path min-cost flow. Bellman-Ford
/// handles the negative reverse-arc costs; relaxation uses strict improvement
/// so tie-broken paths follow arc insertion order deterministically.
struct FlowNetwork {
    adj: Vec<Vec<Arc>>,
}

impl FlowNetwork {
    fn new(nodes: usize) -> Self {
        Self {
            adj: (0..nodes).map(|_| Vec::new()).collect(),
        }
    }

    fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Adds a forward arc and its zero-capacity reverse, returning the
    /// forward arc's position.
    fn add_arc(&mut self, from: usize, to: usize, cap: f64, cost: f64) -> (usize, usize) {
        let forward = self.adj[from].len();
        let backward = self.adj[to].len();
        self.adj[from].push(Arc {
            to,
            rev: backward,
            cap,
            cost,
        });
        self.adj[to].push(Arc {
            to: from,
            rev: forward,
            cap: 0.0,
            cost: -cost,
        });
        (from, forward)
    }

    /// Cheapest augmenting path from `source` to `sink`, as arc positions,
    /// together with the distance labels of the search.
    fn cheapest_path(&self, source: usize, sink: usize) -> Option<(Vec<(usize, usize)>, Vec<f64>)> {
        let n = self.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; n];
        dist[source] = 0.0;

        for _ in 0..n.saturating_sub(1) {
            let mut relaxed = false;
            for from in 0..n {
                if !dist[from].is_finite() {
                    continue;
                }
                for (idx, arc) in self.adj[from].iter().enumerate() {
                    if arc.cap <= EPS {
                        continue;
                    }
                    let candidate = dist[from] + arc.cost;
                    if candidate < dist[arc.to] - EPS {
                        dist[arc.to] = candidate;
                        prev[arc.to] = Some((from, idx));
                        relaxed = true;
                    }
                }
            }
            if !relaxed {
                break;
            }
        }

        if !dist[sink].is_finite() {
            return None;
        }
        let mut path = Vec::new();
        let mut node = sink;
        while node != source {
            let (from, idx) = prev[node].expect("finite distance implies a predecessor");
            path.push((from, idx));
            node = from;
        }
        path.reverse();
        Some((path, dist))
    }

    fn bottleneck(&self, path: &[(usize, usize)]) -> f64 {
        path.iter()
            .map(|&(from, idx)| self.adj[from][idx].cap)
            .fold(f64::INFINITY, f64::min)
    }

    fn push(&mut self, path: &[(usize, usize)], amount: f64) {
        for &(from, idx) in path {
            let (to, rev) = {
                let arc = &self.adj[from][idx];
                (arc.to, arc.rev)
            };
            self.adj[from][idx].cap -= amount;
            self.adj[to][rev].cap += amount;
        }
    }

    /// Flow pushed through a forward arc, read off its reverse arc.
    fn flow(&self, arc: (usize, usize)) -> f64 {
        let (from, idx) = arc;
        let forward = &self.adj[from][idx];
        self.adj[forward.to][forward.rev].cap
    }
}
