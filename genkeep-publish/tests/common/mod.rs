//! Shared fixtures: the artifacts of one generated `orders` table.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use genkeep_manifest::Layout;
use genkeep_publish::Artifact;
use tempfile::TempDir;

pub const ORDER: &str = r#"package com.acme.model.gen;

import java.math.BigDecimal;

public class Order {
    private Long id;

    private BigDecimal total;

    public Long getId() {
        return id;
    }

    public void setId(Long id) {
        this.id = id;
    }

    public BigDecimal getTotal() {
        return total;
    }

    public void setTotal(BigDecimal total) {
        this.total = total;
    }
}
"#;

pub const ORDER_EXAMPLE: &str = r#"package com.acme.model.gen;

import java.util.ArrayList;
import java.util.List;

public class OrderExample {
    protected String orderByClause;

    protected List<Criteria> oredCriteria;

    public OrderExample() {
        oredCriteria = new ArrayList<Criteria>();
    }

    public static class Criteria {
    }
}
"#;

pub const ORDER_MAPPER: &str = r#"package com.acme.dao.gen;

import com.acme.model.gen.Order;
import com.acme.model.gen.OrderExample;
import java.util.List;

public interface OrderMapper {
    long countByExample(OrderExample example);

    int insert(Order record);

    List<Order> selectByExample(OrderExample example);

    Order selectByPrimaryKey(Long id);
}
"#;

pub const ORDER_MAPPER_XML: &str = r##"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd" >
<mapper namespace="com.acme.dao.gen.OrderMapper" >
  <resultMap id="BaseResultMap" type="com.acme.model.gen.Order" >
    <id column="id" property="id" jdbcType="BIGINT" />
    <result column="total" property="total" jdbcType="DECIMAL" />
  </resultMap>
  <select id="selectByExample" resultMap="BaseResultMap" parameterType="com.acme.model.gen.OrderExample" >
    select id, total from orders
  </select>
  <insert id="insert" parameterType="com.acme.model.gen.Order" >
    insert into orders (id, total) values (#{id,jdbcType=BIGINT}, #{total,jdbcType=DECIMAL})
  </insert>
</mapper>
"##;

/// Model, criteria class, persistence interface and descriptor of `orders`.
pub fn order_batch() -> Vec<Artifact> {
    let layout = Layout::default();
    vec![
        Artifact::classified("java", "com.acme.model.gen", "Order.java", ORDER, &layout),
        Artifact::classified(
            "java",
            "com.acme.model.gen",
            "OrderExample.java",
            ORDER_EXAMPLE,
            &layout,
        ),
        Artifact::classified(
            "java",
            "com.acme.dao.gen",
            "OrderMapper.java",
            ORDER_MAPPER,
            &layout,
        ),
        Artifact::classified(
            "resources",
            "com.acme.dao.gen",
            "OrderMapper.xml",
            ORDER_MAPPER_XML,
            &layout,
        ),
    ]
}

/// A temp output root with the `java` and `resources` projects created.
pub fn output_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("java")).unwrap();
    std::fs::create_dir(temp.path().join("resources")).unwrap();
    temp
}

/// Every file below `root`, relative and `/`-separated, sorted.
pub fn files(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, out);
            } else {
                out.push(path);
            }
        }
    }

    let mut paths = Vec::new();
    walk(root, &mut paths);
    let mut files: Vec<String> = paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

pub fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}
