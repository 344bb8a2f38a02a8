use super::annealer::{AnnealParams, AnnealReport, Annealer};
use super::traits::Objective;
use floorplan_common::db::core::Layout;
use floorplan_common::util::profiler::ScopedTimer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Runs one independent annealing chain per seed and keeps the best.
///
/// Each chain works on its own copy of `layout` with its own generator, so
/// every chain is the same sequential Markov chain a single run would be.
/// The winner is the chain with the lowest best cost; ties go to the earlier
/// seed, which keeps the result independent of thread scheduling.
pub fn anneal_multistart<O>(
    layout: &mut Layout,
    params: &AnnealParams,
    objective: &O,
    seeds: &[u64],
) -> anyhow::Result<AnnealReport>
where
    O: Objective + Clone + Sync,
{
    if seeds.is_empty() {
        anyhow::bail!("Multi-start annealing needs at least one seed");
    }

    log::info!("Running {} annealing chains in parallel", seeds.len());

    let source: &Layout = layout;
    let runs = seeds
        .par_iter()
        .map(|&seed| -> anyhow::Result<(u64, Layout, AnnealReport)> {
            let _timer = ScopedTimer::new("Annealing chain").with_level(log::Level::Debug);
            let mut chain = source.clone();
            let mut annealer =
                Annealer::new(params.clone(), objective.clone(), StdRng::seed_from_u64(seed))
                    .with_progress_level(log::Level::Debug);
            let report = annealer.optimize(&mut chain)?;
            log::info!(
                "Chain seed {}: best cost {:.4} ({} of {} moves accepted)",
                seed,
                report.best_cost,
                report.moves_accepted,
                report.moves_evaluated
            );
            Ok((seed, chain, report))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let Some((seed, chain, report)) = runs
        .into_iter()
        .min_by(|a, b| a.2.best_cost.total_cmp(&b.2.best_cost))
    else {
        anyhow::bail!("No annealing chain completed");
    };

    log::info!("Best chain: seed {} with cost {:.4}", seed, report.best_cost);
    *layout = chain;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::cost::CostModel;
    use crate::solver::schedule::CoolingSchedule;
    use floorplan_common::db::core::{Module, Net};

    fn instance() -> Layout {
        let modules = vec![
            Module::placed(12, 4, 0, 0),
            Module::placed(6, 9, 12, 0),
            Module::placed(3, 3, 18, 0),
            Module::placed(15, 10, 0, 9),
            Module::placed(8, 8, 15, 9),
        ];
        let nets = vec![
            Net::from_one_based(0, &[1, 3, 5], 5).unwrap(),
            Net::from_one_based(1, &[2, 4], 5).unwrap(),
            Net::from_one_based(2, &[5, 1, 2, 4], 5).unwrap(),
        ];
        Layout::new(modules, nets).unwrap()
    }

    fn params() -> AnnealParams {
        AnnealParams {
            schedule: CoolingSchedule {
                initial_temperature: 20.0,
                min_temperature: 1.0,
                ..CoolingSchedule::default()
            },
            moves_per_temperature: 30,
            ..AnnealParams::default()
        }
    }

    #[test]
    fn picks_lowest_cost_chain() {
        let seeds = [3, 14, 15, 92];
        let cost = CostModel::default();

        let singles: Vec<(Vec<Module>, f64)> = seeds
            .iter()
            .map(|&seed| {
                let mut layout = instance();
                let mut annealer = Annealer::new(params(), cost, StdRng::seed_from_u64(seed));
                let report = annealer.optimize(&mut layout).unwrap();
                (layout.modules().to_vec(), report.best_cost)
            })
            .collect();
        let best = singles
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();

        let mut layout = instance();
        let report = anneal_multistart(&mut layout, &params(), &cost, &seeds).unwrap();
        assert_eq!(report.best_cost, best.1);
        assert_eq!(layout.modules(), best.0.as_slice());
    }

    #[test]
    fn single_seed_matches_plain_run() {
        let cost = CostModel::default();
        let mut plain = instance();
        let expected = Annealer::new(params(), cost, StdRng::seed_from_u64(8))
            .optimize(&mut plain)
            .unwrap();

        let mut layout = instance();
        let report = anneal_multistart(&mut layout, &params(), &cost, &[8]).unwrap();
        assert_eq!(report, expected);
        assert_eq!(layout.modules(), plain.modules());
    }

    #[test]
    fn requires_a_seed() {
        let mut layout = instance();
        assert!(anneal_multistart(&mut layout, &params(), &CostModel::default(), &[]).is_err());
    }
}
