//! Test modules for meshview-io
//!
//! Scenario tests that drive the OBJ and MTL parsers together the way the
//! renderer front end does: parse, join materials, bind vertex streams.

pub mod model_scenario_tests;
