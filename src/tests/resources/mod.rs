mod node_dns_tests;
