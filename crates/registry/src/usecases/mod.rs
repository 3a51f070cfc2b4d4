pub mod u501_backup;
