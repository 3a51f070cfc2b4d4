pub mod d400_employee_summary;
pub mod d401_branch_roster;
pub mod d402_reference_audit;
