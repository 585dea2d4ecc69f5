#![no_main]

use libfuzzer_sys::fuzz_target;
use torus_cover::Matrix;

const COLUMNS: u8 = 8;

#[derive(Debug, arbitrary::Arbitrary)]
struct MatrixInput {
    secondary: u8,
    rows: Vec<u8>,
}

fuzz_target!(|input: MatrixInput| {
    let secondary = input.secondary & 0b11;
    // Each byte is a bitmask over the columns.
    let rows: Vec<(usize, Vec<u8>)> = input
        .rows
        .iter()
        .take(24)
        .enumerate()
        .filter(|(_, mask)| **mask != 0)
        .map(|(id, mask)| (id, (0..COLUMNS).filter(|bit| *mask & (1u8 << *bit) != 0).collect()))
        .collect();

    let builder = (0..COLUMNS).fold(Matrix::builder(), |builder, column| {
        if column < secondary {
            builder.secondary_column(column)
        } else {
            builder.column(column)
        }
    });
    let mut matrix = rows
        .iter()
        .fold(builder, |builder, (id, columns)| {
            builder.row(*id, columns.iter().copied())
        })
        .build()
        .unwrap();

    let solutions = matrix.all_solutions();
    for solution in &solutions {
        let mut covered = 0u8;
        for row in solution {
            let mask = input.rows[*row];
            assert_eq!(covered & mask, 0, "column covered twice");
            covered |= mask;
        }
        let primary = !0u8 << secondary;
        assert_eq!(covered & primary, primary, "primary column left uncovered");
    }

    // The matrix must come back intact after every search.
    assert_eq!(matrix.all_solutions(), solutions);
    assert_eq!(matrix.solutions().count(), solutions.len());
});
