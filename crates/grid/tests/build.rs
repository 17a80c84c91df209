//! Integration tests for building and querying the grids

use rstest::{fixture, rstest};
use xstools_grid::{
    build, Acceleration, Error, GridType, SimulationData, SimulationParameters, NUM_MATERIALS,
    UNUSED_ISOTOPE,
};
use xstools_utils::SortExt;

fn params(n_isotopes: usize, n_gridpoints: usize, grid_type: GridType) -> SimulationParameters {
    SimulationParameters {
        n_isotopes,
        n_gridpoints,
        grid_type,
        hash_bins: 4000,
    }
}

#[fixture]
fn unionized() -> SimulationData {
    build(&params(5, 30, GridType::Unionized), 0).unwrap()
}

#[fixture]
fn hashed() -> SimulationData {
    build(&params(3, 10, GridType::Hash), 0).unwrap()
}

#[rstest]
#[case(GridType::None)] // case 1
#[case(GridType::Unionized)] // case 2
#[case(GridType::Hash)] // case 3
fn builds_are_bit_identical(#[case] grid_type: GridType) {
    let a = build(&params(4, 20, grid_type), 0).unwrap();
    let b = build(&params(4, 20, grid_type), 1).unwrap();

    assert_eq!(a.nuclide_grid.points(), b.nuclide_grid.points());
    assert_eq!(a.unionized_energy_array(), b.unionized_energy_array());
    assert_eq!(a.index_grid(), b.index_grid());
    assert_eq!(a.materials, b.materials);
}

#[rstest]
fn every_segment_and_the_axis_are_sorted(unionized: SimulationData) {
    assert!(unionized
        .nuclide_grid
        .segments()
        .all(|s| s.is_sorted_by_float_key(|p| p.energy)));
    assert!(unionized
        .unionized_energy_array()
        .is_sorted_by_float_key(|e| *e));
}

#[rstest]
fn unionized_index_brackets_axis(unionized: SimulationData) {
    let Acceleration::Unionized(union) = &unionized.acceleration else {
        panic!("expected a unionized grid");
    };
    let grid = &unionized.nuclide_grid;

    for (e, &energy) in union.energies().iter().enumerate() {
        for isotope in 0..grid.n_isotopes() {
            let k = union.interval_at(e, isotope);
            let segment = grid.segment(isotope);

            // below the first point of an isotope the first interval is used
            assert!(segment[k].energy <= energy || (k == 0 && energy < segment[0].energy));
            assert!(k == grid.last_interval() || energy < segment[k + 1].energy);
        }
    }
}

#[rstest]
fn unionized_columns_never_decrease(unionized: SimulationData) {
    let Acceleration::Unionized(union) = &unionized.acceleration else {
        panic!("expected a unionized grid");
    };

    for e in 1..union.len() {
        for (before, after) in union.row(e - 1).iter().zip(union.row(e)) {
            assert!(after >= before);
        }
    }
}

#[rstest]
fn hash_guesses_refine_to_full_search(hashed: SimulationData) {
    let Acceleration::Hash(hash) = &hashed.acceleration else {
        panic!("expected a hash grid");
    };
    let grid = &hashed.nuclide_grid;
    let du = 1.0 / hash.hash_bins() as f64;

    for bin in 0..hash.hash_bins() {
        let energy = bin as f64 * du;
        for isotope in 0..grid.n_isotopes() {
            assert_eq!(
                hash.interval(grid, isotope, energy),
                grid.interval(isotope, energy)
            );
        }
    }
}

#[test]
fn unionized_scenario() {
    let data = build(&params(2, 4, GridType::Unionized), 0).unwrap();

    assert_eq!(data.length_unionized_energy_array(), 8);
    assert!(data
        .unionized_energy_array()
        .is_sorted_by_float_key(|e| *e));
    assert_eq!(data.length_index_grid(), 8 * 2);
    assert!(data.index_grid().iter().all(|k| *k <= 2));
}

#[rstest]
fn hash_scenario(hashed: SimulationData) {
    assert_eq!(hashed.length_index_grid(), 4000 * 3);
    assert!(hashed.index_grid().iter().all(|k| *k <= 8));
}

#[rstest]
#[case(GridType::None)] // case 1
#[case(GridType::Unionized)] // case 2
#[case(GridType::Hash)] // case 3
fn top_energy_is_last_interval(#[case] grid_type: GridType) {
    let data = build(&params(3, 10, grid_type), 0).unwrap();
    let grid = &data.nuclide_grid;

    for isotope in 0..grid.n_isotopes() {
        let top = grid.segment(isotope)[9].energy;
        assert_eq!(data.interval(isotope, top), 8);
    }
}

#[rstest]
#[case(GridType::Unionized)] // case 1
#[case(GridType::Hash)] // case 2
fn accelerated_lookups_match_bisection(#[case] grid_type: GridType) {
    let data = build(&params(6, 50, grid_type), 0).unwrap();

    for step in 0..=1000 {
        let energy = step as f64 / 1000.0;
        for isotope in 0..6 {
            assert_eq!(
                data.interval(isotope, energy),
                data.nuclide_grid.interval(isotope, energy)
            );
        }
    }
}

#[rstest]
#[case(2)] // case 1
#[case(68)] // case 2
#[case(355)] // case 3
fn material_ids_stay_in_bounds(#[case] n_isotopes: usize) {
    let data = build(&params(n_isotopes, 2, GridType::None), 0).unwrap();
    let table = &data.materials;
    let width = table.max_num_nucs();

    assert_eq!(table.num_nucs().len(), NUM_MATERIALS);
    for (m, &count) in table.num_nucs().iter().enumerate() {
        assert!((1..=width).contains(&count));
        assert!(table.constituents(m).all(|(id, _)| id < n_isotopes));
        assert!(table.mats()[m * width + count..(m + 1) * width]
            .iter()
            .all(|id| *id == UNUSED_ISOTOPE));
    }
}

#[rstest]
#[case(0, 10, GridType::None, 10)] // case 1
#[case(3, 1, GridType::Unionized, 10)] // case 2
#[case(3, 0, GridType::None, 10)] // case 3
#[case(3, 10, GridType::Hash, 0)] // case 4
fn invalid_configurations(
    #[case] n_isotopes: usize,
    #[case] n_gridpoints: usize,
    #[case] grid_type: GridType,
    #[case] hash_bins: usize,
) {
    let params = SimulationParameters {
        n_isotopes,
        n_gridpoints,
        grid_type,
        hash_bins,
    };

    assert!(matches!(
        build(&params, 0),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn oversized_grid_is_an_error() {
    // passes validation, but no allocator can reserve this much
    let params = SimulationParameters {
        n_isotopes: 1 << 40,
        n_gridpoints: 1 << 20,
        grid_type: GridType::None,
        hash_bins: 1,
    };

    assert!(matches!(
        build(&params, 0),
        Err(Error::AllocationFailure { .. })
    ));
}
