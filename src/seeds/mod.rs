pub mod sample_interviews;
