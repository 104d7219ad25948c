pub mod coordinates;
pub mod grid_cell;
pub mod query_record;
pub mod reference_point;
pub mod station;
pub mod xyz;
