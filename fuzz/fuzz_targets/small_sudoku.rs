#![no_main]

use libfuzzer_sys::fuzz_target;
use torus_cover::{
    sudoku::{self, Possibility, Sudoku},
    ExactCover,
};

#[derive(Debug)]
struct Sudoku4x4Input {
    filled_entries: Vec<Possibility>,
}

impl<'a> arbitrary::Arbitrary<'a> for Sudoku4x4Input {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let filled_entries = u
            .arbitrary::<[u8; 16]>()?
            .into_iter()
            .map(usize::from)
            .enumerate()
            .filter_map(|(index, value)| {
                let row = index / 4;
                let column = index % 4;
                let value = value % 5;

                if value == 0 {
                    None
                } else {
                    Some(Possibility::new(row, column, value, 2))
                }
            })
            .collect();

        Ok(Sudoku4x4Input { filled_entries })
    }
}

fuzz_target!(|data: Sudoku4x4Input| {
    let puzzle_4x4 = Sudoku::new(2, data.filled_entries.iter().copied());
    let mut matrix = puzzle_4x4.matrix().unwrap();

    for solution in matrix.all_solutions() {
        let grid = sudoku::render(&solution, 2);
        assert!(!grid.contains('0'), "incomplete grid {grid}");
        for given in &data.filled_entries {
            assert!(solution.contains(given));
        }
    }
});
