//! Multi-objective genetic route optimizer.
//!
//! Evolves populations of full path genomes against a weighted combination of
//! normalized distance, fuel, safety-risk and time. The A* distance-optimal
//! path serves two roles: its totals normalize the fitness components, and it
//! seeds the initial population so a feasible genome exists whenever the
//! endpoints are connected. Elitism keeps the best genomes unmodified, so the
//! best fitness never worsens between generations.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

use crate::cost::CostModel;
use crate::grid::{Cell, Grid};
use crate::metrics::{path_totals, PathTotals};
use crate::path::{find_route_a_star, SearchBudget, SearchOutcome};

/// Relative importance of each objective. Values are treated as relative
/// weights and need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub distance: f64,
    pub fuel: f64,
    pub safety: f64,
    pub time: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            distance: 0.25,
            fuel: 0.35,
            safety: 0.25,
            time: 0.15,
        }
    }
}

/// Tunable parameters for the evolutionary search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    pub population_size: usize,
    /// Generation budget.
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    /// Genomes carried unmodified into the next generation.
    pub elite_count: usize,
    /// Consecutive non-improving generations tolerated before stopping early.
    pub stall_limit: usize,
    /// Probability that a construction step ignores the goal-ward bias.
    pub exploration: f64,
    pub seed: u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            generations: 80,
            crossover_rate: 0.8,
            mutation_rate: 0.15,
            tournament_size: 5,
            elite_count: 6,
            stall_limit: 15,
            exploration: 0.3,
            seed: 42,
        }
    }
}

/// Fitness components of one genome. `scalar` is the weighted, normalized
/// combination the optimizer minimizes; the rest are raw totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitnessBreakdown {
    pub distance_km: f64,
    pub fuel_tons: f64,
    pub time_hours: f64,
    pub risk: f64,
    pub scalar: f64,
}

impl FitnessBreakdown {
    fn unevaluated() -> Self {
        Self {
            distance_km: 0.0,
            fuel_tons: 0.0,
            time_hours: 0.0,
            risk: 0.0,
            scalar: f64::INFINITY,
        }
    }
}

/// One candidate route in the population.
#[derive(Debug, Clone)]
struct Genome {
    cells: Vec<Cell>,
    fitness: FitnessBreakdown,
}

impl Genome {
    fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            fitness: FitnessBreakdown::unevaluated(),
        }
    }
}

/// The winning genome of an optimizer run.
#[derive(Debug, Clone)]
pub struct BestGenome {
    pub cells: Vec<Cell>,
    pub fitness: FitnessBreakdown,
    pub generations_run: usize,
    /// Total genome evaluations across all generations.
    pub evaluations: usize,
    /// Best scalar fitness after each generation; non-increasing thanks to
    /// elitism.
    pub fitness_history: Vec<f64>,
}

/// Terminal states of an optimizer run.
#[derive(Debug, Clone)]
pub enum GeneticOutcome {
    Found(BestGenome),
    /// No feasible genome exists: the endpoints are disconnected.
    NoFeasibleGenome { nodes_explored: usize },
    /// The reference search tripped the expansion budget.
    BudgetExceeded { nodes_explored: usize },
}

/// Reference totals the fitness components are normalized against.
struct Normalizer {
    distance: f64,
    fuel: f64,
    time: f64,
    risk: f64,
}

impl Normalizer {
    fn from_totals(totals: &PathTotals) -> Self {
        Self {
            distance: totals.distance_km.max(f64::EPSILON),
            fuel: totals.fuel_tons.max(f64::EPSILON),
            time: totals.time_hours.max(f64::EPSILON),
            // The distance-optimal reference often carries zero risk.
            risk: totals.risk.max(1.0),
        }
    }
}

/// Genetic algorithm for multi-objective route optimization.
pub struct GeneticOptimizer<'a> {
    grid: &'a Grid,
    model: &'a CostModel<'a>,
    config: GeneticConfig,
    weights: ObjectiveWeights,
}

impl<'a> GeneticOptimizer<'a> {
    pub fn new(
        grid: &'a Grid,
        model: &'a CostModel<'a>,
        config: GeneticConfig,
        weights: ObjectiveWeights,
    ) -> Self {
        Self {
            grid,
            model,
            config,
            weights,
        }
    }

    /// Evolve a route between `start` and `goal`.
    pub fn optimize(&self, start: Cell, goal: Cell, budget: SearchBudget) -> GeneticOutcome {
        let reference = match find_route_a_star(self.grid, self.model, start, goal, budget) {
            SearchOutcome::Found(found) => found,
            SearchOutcome::FrontierExhausted { nodes_explored } => {
                return GeneticOutcome::NoFeasibleGenome { nodes_explored }
            }
            SearchOutcome::BudgetExceeded { nodes_explored } => {
                return GeneticOutcome::BudgetExceeded { nodes_explored }
            }
        };
        let normalizer = Normalizer::from_totals(&path_totals(self.model, &reference.cells));

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut population = self.initial_population(start, goal, reference.cells, &mut rng);
        self.evaluate_all(&mut population, &normalizer);
        let mut evaluations = population.len();

        let mut best = self.fittest(&population).clone();
        let mut fitness_history = Vec::with_capacity(self.config.generations);
        let mut stall = 0usize;

        for _ in 0..self.config.generations {
            let mut offspring = self.breed(&population, budget, &mut rng);
            self.evaluate_all(&mut offspring, &normalizer);
            evaluations += offspring.len();

            population = self.next_generation(population, offspring);

            let generation_best = self.fittest(&population);
            if generation_best.fitness.scalar < best.fitness.scalar {
                best = generation_best.clone();
                stall = 0;
            } else {
                stall += 1;
            }
            fitness_history.push(best.fitness.scalar);

            if stall >= self.config.stall_limit {
                tracing::debug!(
                    generations = fitness_history.len(),
                    "evolution stalled, stopping early"
                );
                break;
            }
        }

        GeneticOutcome::Found(BestGenome {
            cells: best.cells,
            fitness: best.fitness,
            generations_run: fitness_history.len(),
            evaluations,
            fitness_history,
        })
    }

    /// Seed the population with the reference path plus biased random walks.
    fn initial_population(
        &self,
        start: Cell,
        goal: Cell,
        reference: Vec<Cell>,
        rng: &mut StdRng,
    ) -> Vec<Genome> {
        let target = self.config.population_size.max(2);
        let mut genomes = vec![Genome::new(reference)];
        let mut attempts = 0usize;
        while genomes.len() < target && attempts < target * 10 {
            attempts += 1;
            if let Some(cells) = self.biased_walk(start, goal, rng) {
                genomes.push(Genome::new(cells));
            }
        }
        genomes
    }

    /// Goal-biased random walk. Each step prefers the neighbour closest to
    /// the goal and explores a random one with `config.exploration`
    /// probability. Returns `None` when the walk fails to reach the goal
    /// within its step allowance.
    fn biased_walk(&self, start: Cell, goal: Cell, rng: &mut StdRng) -> Option<Vec<Cell>> {
        let max_steps = (4 * (self.grid.width() + self.grid.height())).max(8) as usize;
        let mut cells = vec![start];
        let mut current = start;

        for _ in 0..max_steps {
            if current == goal {
                return Some(cells);
            }

            let neighbors = self.grid.neighbors(current);
            if neighbors.is_empty() {
                return None;
            }
            let previous = if cells.len() >= 2 {
                Some(cells[cells.len() - 2])
            } else {
                None
            };
            let candidates: Vec<Cell> = neighbors
                .iter()
                .copied()
                .filter(|cell| Some(*cell) != previous)
                .collect();
            let pool = if candidates.is_empty() {
                &neighbors
            } else {
                &candidates
            };

            let next = if rng.gen::<f64>() < self.config.exploration {
                *pool.choose(rng)?
            } else {
                *pool.iter().min_by(|a, b| {
                    a.distance_cells(&goal).total_cmp(&b.distance_cells(&goal))
                })?
            };

            cells.push(next);
            current = next;
        }

        (current == goal).then_some(cells)
    }

    fn evaluate_all(&self, genomes: &mut [Genome], normalizer: &Normalizer) {
        // Fitness is embarrassingly parallel within a generation; selection
        // afterwards needs the full ranking, so this is the sync point.
        genomes.par_iter_mut().for_each(|genome| {
            genome.fitness = self.evaluate(&genome.cells, normalizer);
        });
    }

    fn evaluate(&self, cells: &[Cell], normalizer: &Normalizer) -> FitnessBreakdown {
        let totals = path_totals(self.model, cells);
        let scalar = self.weights.distance * totals.distance_km / normalizer.distance
            + self.weights.fuel * totals.fuel_tons / normalizer.fuel
            + self.weights.time * totals.time_hours / normalizer.time
            + self.weights.safety * totals.risk / normalizer.risk;

        FitnessBreakdown {
            distance_km: totals.distance_km,
            fuel_tons: totals.fuel_tons,
            time_hours: totals.time_hours,
            risk: totals.risk,
            scalar,
        }
    }

    fn fittest<'p>(&self, population: &'p [Genome]) -> &'p Genome {
        let mut best = &population[0];
        for genome in &population[1..] {
            if genome.fitness.scalar < best.fitness.scalar {
                best = genome;
            }
        }
        best
    }

    fn tournament_winner<'p>(&self, population: &'p [Genome], rng: &mut StdRng) -> &'p Genome {
        let mut best = &population[rng.gen_range(0..population.len())];
        for _ in 1..self.config.tournament_size.max(1) {
            let candidate = &population[rng.gen_range(0..population.len())];
            if candidate.fitness.scalar < best.fitness.scalar {
                best = candidate;
            }
        }
        best
    }

    /// Produce one generation of offspring via selection, crossover and
    /// mutation.
    fn breed(&self, population: &[Genome], budget: SearchBudget, rng: &mut StdRng) -> Vec<Genome> {
        let target = self.config.population_size.max(2);
        let mut offspring = Vec::with_capacity(target + 1);

        while offspring.len() < target {
            let parent_a = self.tournament_winner(population, rng);
            let parent_b = self.tournament_winner(population, rng);

            if rng.gen::<f64>() < self.config.crossover_rate {
                if let Some((first, second)) =
                    self.crossover(&parent_a.cells, &parent_b.cells, budget, rng)
                {
                    offspring.push(Genome::new(first));
                    offspring.push(Genome::new(second));
                    continue;
                }
            }
            offspring.push(parent_a.clone());
            offspring.push(parent_b.clone());
        }
        offspring.truncate(target);

        for genome in &mut offspring {
            if rng.gen::<f64>() < self.config.mutation_rate {
                self.mutate(&mut genome.cells, rng);
            }
        }

        offspring
    }

    /// Splice two parents at a randomly chosen shared cell. Parents without a
    /// shared interior cell are repaired by reconnecting a prefix of one to a
    /// suffix of the other with a local A* bridge.
    fn crossover(
        &self,
        a: &[Cell],
        b: &[Cell],
        budget: SearchBudget,
        rng: &mut StdRng,
    ) -> Option<(Vec<Cell>, Vec<Cell>)> {
        if a.len() < 3 || b.len() < 3 {
            return None;
        }

        let mut positions_in_a: HashMap<Cell, usize> = HashMap::new();
        for (index, cell) in a.iter().enumerate().take(a.len() - 1).skip(1) {
            positions_in_a.entry(*cell).or_insert(index);
        }
        let shared: Vec<(usize, usize)> = b
            .iter()
            .enumerate()
            .take(b.len() - 1)
            .skip(1)
            .filter_map(|(index_b, cell)| {
                positions_in_a.get(cell).map(|&index_a| (index_a, index_b))
            })
            .collect();

        if let Some(&(index_a, index_b)) = shared.choose(rng) {
            let mut first = a[..=index_a].to_vec();
            first.extend_from_slice(&b[index_b + 1..]);
            let mut second = b[..=index_b].to_vec();
            second.extend_from_slice(&a[index_a + 1..]);
            return Some((first, second));
        }

        let cut_a = rng.gen_range(1..a.len() - 1);
        let cut_b = rng.gen_range(1..b.len() - 1);
        let SearchOutcome::Found(bridge) =
            find_route_a_star(self.grid, self.model, a[cut_a], b[cut_b], budget)
        else {
            return None;
        };

        let mut first = a[..cut_a].to_vec();
        first.extend_from_slice(&bridge.cells);
        first.extend_from_slice(&b[cut_b + 1..]);

        let mut second = b[..cut_b].to_vec();
        second.extend(bridge.cells.iter().rev());
        second.extend_from_slice(&a[cut_a + 1..]);

        Some((first, second))
    }

    /// Replace a contiguous sub-segment with a fresh biased-walk detour
    /// between its endpoints. The genome is left untouched when no detour is
    /// found.
    fn mutate(&self, cells: &mut Vec<Cell>, rng: &mut StdRng) {
        if cells.len() < 2 {
            return;
        }
        let from = rng.gen_range(0..cells.len() - 1);
        let to = rng.gen_range(from + 1..cells.len());

        if let Some(detour) = self.biased_walk(cells[from], cells[to], rng) {
            let mut spliced = cells[..from].to_vec();
            spliced.extend(detour);
            spliced.extend_from_slice(&cells[to + 1..]);
            *cells = spliced;
        }
    }

    /// Elitism: the best of the old generation survives unmodified, the rest
    /// of the slots go to the fittest offspring.
    fn next_generation(&self, mut population: Vec<Genome>, mut offspring: Vec<Genome>) -> Vec<Genome> {
        let target = self.config.population_size.max(2);
        population.sort_by(|x, y| x.fitness.scalar.total_cmp(&y.fitness.scalar));
        offspring.sort_by(|x, y| x.fitness.scalar.total_cmp(&y.fitness.scalar));

        let elite_count = self.config.elite_count.clamp(1, population.len());
        let mut next: Vec<Genome> = population[..elite_count].to_vec();
        next.extend(
            offspring
                .into_iter()
                .take(target.saturating_sub(elite_count)),
        );

        let mut refill = 0usize;
        while next.len() < target && refill < population.len() {
            next.push(population[refill].clone());
            refill += 1;
        }
        next
    }
}
