//! Simulates FCFS, SJF, Priority and Round Robin CPU scheduling on a single
//! processor and compares their waiting and turnaround times.

pub mod scheduler;
pub mod simulator;
