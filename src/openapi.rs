use serde_json::{Value, json};

/// OpenAPI 3.0 description of the service, served at `GET /openapi.json`.
pub fn document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Outline Pages Worker",
            "description": "Proxy for creating, reading, and updating Outline wiki pages. \
                            Supports append, prepend, replace, and find/replace content \
                            updates plus markdown table row upserts with optional sorting.",
            "version": "1.0.0"
        },
        "paths": {
            "/api/pages": {
                "post": {
                    "summary": "Manage Outline wiki pages",
                    "operationId": "managePage",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "oneOf": [
                                        { "$ref": "#/components/schemas/CreatePageRequest" },
                                        { "$ref": "#/components/schemas/ReadPageRequest" },
                                        { "$ref": "#/components/schemas/UpdatePageRequest" },
                                        { "$ref": "#/components/schemas/UpdateTablePageRequest" }
                                    ]
                                },
                                "examples": {
                                    "create_page": {
                                        "summary": "Create a new page",
                                        "value": {
                                            "operation": "create",
                                            "collection_id": "01234567-89ab-cdef-0123-456789abcdef",
                                            "title": "New Page Title",
                                            "content": "# New Page\n\nBody text.",
                                            "api_key": "outline_api_key_here",
                                            "email": "user@example.com"
                                        }
                                    },
                                    "read_page": {
                                        "summary": "Read an existing page",
                                        "value": {
                                            "operation": "read",
                                            "document_id": "01234567-89ab-cdef-0123-456789abcdef",
                                            "api_key": "outline_api_key_here",
                                            "email": "user@example.com"
                                        }
                                    },
                                    "find_replace": {
                                        "summary": "Find and replace text in a page",
                                        "value": {
                                            "operation": "update",
                                            "document_id": "01234567-89ab-cdef-0123-456789abcdef",
                                            "update_type": "find_replace",
                                            "find": "Old text",
                                            "content": "New text",
                                            "api_key": "outline_api_key_here",
                                            "email": "user@example.com"
                                        }
                                    },
                                    "update_table": {
                                        "summary": "Upsert a row into a matching markdown table",
                                        "value": {
                                            "operation": "update_table",
                                            "document_id": "01234567-89ab-cdef-0123-456789abcdef",
                                            "table_data": { "Task": "Ship it", "Status": "Done" },
                                            "sort_by": "Task",
                                            "sort_order": "asc",
                                            "api_key": "outline_api_key_here",
                                            "email": "user@example.com"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Operation successful",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "oneOf": [
                                            { "$ref": "#/components/schemas/CreatePageResponse" },
                                            { "$ref": "#/components/schemas/ReadPageResponse" },
                                            { "$ref": "#/components/schemas/UpdatePageResponse" },
                                            { "$ref": "#/components/schemas/UpdateTablePageResponse" }
                                        ]
                                    }
                                }
                            }
                        },
                        "400": {
                            "description": "Validation error",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                }
                            }
                        },
                        "409": {
                            "description": "Column mismatch or find text not present",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                }
                            }
                        },
                        "502": {
                            "description": "Outline API error",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                }
                            }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": { "description": "Service is healthy" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "CreatePageRequest": {
                    "type": "object",
                    "required": ["operation", "collection_id", "title", "content", "api_key", "email"],
                    "properties": {
                        "operation": { "type": "string", "enum": ["create"] },
                        "collection_id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string" },
                        "content": { "type": "string", "description": "Markdown content of the new page" },
                        "api_key": { "type": "string" },
                        "email": { "type": "string", "format": "email" }
                    }
                },
                "ReadPageRequest": {
                    "type": "object",
                    "required": ["operation", "document_id", "api_key", "email"],
                    "properties": {
                        "operation": { "type": "string", "enum": ["read"] },
                        "document_id": { "type": "string", "format": "uuid" },
                        "api_key": { "type": "string" },
                        "email": { "type": "string", "format": "email" }
                    }
                },
                "UpdatePageRequest": {
                    "type": "object",
                    "required": ["operation", "document_id", "update_type", "content", "api_key", "email"],
                    "properties": {
                        "operation": { "type": "string", "enum": ["update"] },
                        "document_id": { "type": "string", "format": "uuid" },
                        "update_type": {
                            "type": "string",
                            "enum": ["append", "prepend", "replace", "find_replace"]
                        },
                        "content": { "type": "string" },
                        "find": { "type": "string", "description": "Required for find_replace" },
                        "api_key": { "type": "string" },
                        "email": { "type": "string", "format": "email" }
                    }
                },
                "UpdateTablePageRequest": {
                    "type": "object",
                    "required": ["operation", "document_id", "table_data", "api_key", "email"],
                    "properties": {
                        "operation": { "type": "string", "enum": ["update_table"] },
                        "document_id": { "type": "string", "format": "uuid" },
                        "table_data": {
                            "type": "object",
                            "additionalProperties": { "type": "string" },
                            "description": "Column name to cell value for the new row; \
                                            the key set must match an existing table's columns"
                        },
                        "sort_by": { "type": "string", "description": "Column to sort the table by" },
                        "sort_order": { "type": "string", "enum": ["asc", "desc"], "default": "asc" },
                        "api_key": { "type": "string" },
                        "email": { "type": "string", "format": "email" }
                    }
                },
                "CreatePageResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "operation": { "type": "string", "example": "create" },
                        "document_id": { "type": "string", "format": "uuid" },
                        "url": { "type": "string", "format": "uri" }
                    }
                },
                "ReadPageResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "operation": { "type": "string", "example": "read" },
                        "document": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string", "format": "uuid" },
                                "title": { "type": "string" },
                                "content": { "type": "string" },
                                "url": { "type": "string", "format": "uri" },
                                "updated_at": { "type": "string", "format": "date-time" }
                            }
                        }
                    }
                },
                "UpdatePageResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "operation": { "type": "string", "example": "update" },
                        "update_type": {
                            "type": "string",
                            "enum": ["append", "prepend", "replace", "find_replace"]
                        },
                        "document_id": { "type": "string", "format": "uuid" },
                        "url": { "type": "string", "format": "uri" }
                    }
                },
                "UpdateTablePageResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "operation": { "type": "string", "example": "update_table" },
                        "document_id": { "type": "string", "format": "uuid" },
                        "url": { "type": "string", "format": "uri" }
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean", "example": false },
                        "code": { "type": "string" },
                        "error": { "type": "string" }
                    }
                }
            }
        }
    })
}
