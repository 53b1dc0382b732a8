//! Upgrade pass modules.
//!
//! Each pass is a self-contained text-to-text rewrite of one source unit.
//! Passes run in order (1–7) and each assumes the output of the previous
//! ones; Pass 0 is the eligibility gate run before any of them.
//! Shared text helpers live in `pass_utils`.

pub mod pass_result;
pub mod pass_utils;

pub mod p0_eligibility;
pub mod p1_class_form;
pub mod p2_name_directive;
pub mod p3_normalize_lines;
pub mod p4_hoist_block_type;
pub mod p5_binding_method;
pub mod p6_interfaces;
pub mod p7_field_signatures;
