mod api_catalog_routers;
