mod admin_flow_test;
mod helpers;
mod storage_test;
