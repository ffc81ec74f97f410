pub mod asa;
pub mod caprini;
pub mod possum;
pub mod rcri;
pub mod surgical_apgar;
